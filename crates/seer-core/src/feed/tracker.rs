use std::sync::mpsc::Receiver;
use std::sync::Arc;

use super::bus::FeedEventBus;
use super::clock::Clock;
use crate::error::{FeedError, Result};
use crate::events::FeedEvent;
use crate::models::FeedItem;

/// Where to move the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkTarget {
    At(u64),
    Now,
}

/// Posts split around the watermark, both halves in input order.
#[derive(Debug)]
pub struct Partition<'a, T> {
    /// At or before the watermark, capped at the partition limit
    pub seen: Vec<&'a T>,
    /// Strictly after the watermark, uncapped
    pub new: Vec<&'a T>,
}

impl<T: PartialEq> PartialEq for Partition<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen && self.new == other.new
    }
}

/// Tracks the last-seen watermark of a feed.
///
/// A post is "new" iff its `created_at` is strictly greater than the
/// watermark, otherwise it is "seen". The watermark never moves backwards.
pub struct FeedFreshnessTracker {
    watermark: u64,
    clock: Arc<dyn Clock>,
    bus: FeedEventBus,
}

impl FeedFreshnessTracker {
    pub fn new(watermark: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            watermark,
            clock,
            bus: FeedEventBus::new(),
        }
    }

    /// Start a tracker whose watermark is the clock's current time.
    pub fn starting_now(clock: Arc<dyn Clock>) -> Self {
        let watermark = clock.now();
        Self::new(watermark, clock)
    }

    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    pub fn is_new<T: FeedItem>(&self, item: &T) -> bool {
        item.created_at() > self.watermark
    }

    pub fn subscribe(&mut self) -> Receiver<FeedEvent> {
        self.bus.subscribe()
    }

    pub(crate) fn publish(&mut self, event: FeedEvent) {
        self.bus.publish(event);
    }

    /// Split newest-first `posts` into seen and new.
    pub fn partition<'a, T: FeedItem>(&self, posts: &'a [T], limit: usize) -> Partition<'a, T> {
        self.partition_iter(posts, limit)
    }

    /// Same as [`partition`](Self::partition) over any borrowed sequence,
    /// e.g. a filtered view of the feed.
    pub fn partition_iter<'a, T, I>(&self, posts: I, limit: usize) -> Partition<'a, T>
    where
        T: FeedItem + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut seen = Vec::new();
        let mut new = Vec::new();

        for post in posts {
            if self.is_new(post) {
                new.push(post);
            } else if seen.len() < limit {
                seen.push(post);
            }
        }

        Partition { seen, new }
    }

    /// Move the watermark forward and notify subscribers.
    ///
    /// Fails without touching state if the target is earlier than the
    /// current watermark. Re-advancing to the same value is allowed.
    pub fn advance_watermark(&mut self, target: WatermarkTarget) -> Result<u64> {
        let requested = match target {
            WatermarkTarget::At(ts) => ts,
            WatermarkTarget::Now => self.clock.now(),
        };

        if requested < self.watermark {
            tracing::warn!(
                requested,
                current = self.watermark,
                "rejected non-monotonic watermark advance"
            );
            return Err(FeedError::InvalidWatermark {
                requested,
                current: self.watermark,
            });
        }

        let previous = self.watermark;
        self.watermark = requested;
        tracing::debug!(previous, watermark = requested, "watermark advanced");

        self.bus.publish(FeedEvent::WatermarkAdvanced {
            previous,
            watermark: requested,
        });
        Ok(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::clock::test_support::ManualClock;
    use crate::models::Post;

    const T0: u64 = 1_700_000_000;

    fn make_test_post(id: &str, created_at: u64) -> Post {
        Post {
            id: id.to_string(),
            pubkey: "author".to_string(),
            content: format!("post {}", id),
            created_at,
            image_url: None,
            video_url: None,
        }
    }

    fn make_tracker(watermark: u64, now: u64) -> (FeedFreshnessTracker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(now));
        (FeedFreshnessTracker::new(watermark, clock.clone()), clock)
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    /// Newest first, as the feed source delivers them
    fn scenario_posts() -> Vec<Post> {
        vec![
            make_test_post("3", T0 + 2),
            make_test_post("2", T0 + 1),
            make_test_post("1", T0 - 1),
        ]
    }

    #[test]
    fn test_splits_around_watermark() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts = scenario_posts();

        let partition = tracker.partition(&posts, 250);

        assert_eq!(ids(&partition.seen), vec!["1"]);
        assert_eq!(ids(&partition.new), vec!["3", "2"]);
    }

    #[test]
    fn test_advance_to_now_marks_everything_seen() {
        let (mut tracker, clock) = make_tracker(T0, T0);
        let posts = scenario_posts();

        clock.set(T0 + 10);
        assert_eq!(tracker.advance_watermark(WatermarkTarget::Now).unwrap(), T0 + 10);

        let partition = tracker.partition(&posts, 250);
        assert_eq!(ids(&partition.seen), vec!["3", "2", "1"]);
        assert!(partition.new.is_empty());
    }

    #[test]
    fn test_backwards_advance_is_rejected() {
        let (mut tracker, _) = make_tracker(T0, T0);

        let err = tracker
            .advance_watermark(WatermarkTarget::At(T0 - 5))
            .unwrap_err();

        assert_eq!(
            err,
            FeedError::InvalidWatermark {
                requested: T0 - 5,
                current: T0
            }
        );
        assert_eq!(tracker.watermark(), T0);
    }

    #[test]
    fn test_failed_advance_keeps_previous_advance() {
        let (mut tracker, _) = make_tracker(T0, T0);
        tracker.advance_watermark(WatermarkTarget::At(T0 + 100)).unwrap();

        assert!(tracker.advance_watermark(WatermarkTarget::At(T0 + 50)).is_err());
        assert_eq!(tracker.watermark(), T0 + 100);
    }

    #[test]
    fn test_now_behind_watermark_is_rejected() {
        // Persisted watermark from a clock that ran ahead
        let (mut tracker, _) = make_tracker(T0 + 60, T0);
        assert!(tracker.advance_watermark(WatermarkTarget::Now).is_err());
        assert_eq!(tracker.watermark(), T0 + 60);
    }

    #[test]
    fn test_same_value_advance_is_allowed() {
        let (mut tracker, _) = make_tracker(T0, T0);
        assert_eq!(tracker.advance_watermark(WatermarkTarget::At(T0)).unwrap(), T0);
    }

    #[test]
    fn test_post_at_watermark_is_seen() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts = vec![make_test_post("edge", T0)];

        let partition = tracker.partition(&posts, 250);
        assert_eq!(ids(&partition.seen), vec!["edge"]);
        assert!(partition.new.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts: Vec<Post> = Vec::new();

        let partition = tracker.partition(&posts, 250);
        assert!(partition.seen.is_empty());
        assert!(partition.new.is_empty());
    }

    #[test]
    fn test_all_newer_than_watermark() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts = vec![make_test_post("b", T0 + 2), make_test_post("a", T0 + 1)];

        let partition = tracker.partition(&posts, 250);
        assert!(partition.seen.is_empty());
        assert_eq!(ids(&partition.new), vec!["b", "a"]);
    }

    #[test]
    fn test_limit_caps_seen_but_not_new() {
        let (tracker, _) = make_tracker(T0, T0);
        let mut posts: Vec<Post> = (0..5)
            .map(|i| make_test_post(&format!("new-{}", i), T0 + 10 - i))
            .collect();
        posts.extend((0..5).map(|i| make_test_post(&format!("old-{}", i), T0 - i)));

        let partition = tracker.partition(&posts, 2);

        assert_eq!(ids(&partition.seen), vec!["old-0", "old-1"]);
        assert_eq!(partition.new.len(), 5);
    }

    #[test]
    fn test_every_post_lands_in_exactly_one_half() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts: Vec<Post> = (0..20)
            .map(|i| make_test_post(&i.to_string(), T0 + 10 - i))
            .collect();

        let partition = tracker.partition(&posts, 250);

        assert_eq!(partition.seen.len() + partition.new.len(), posts.len());
        for post in &posts {
            let in_seen = partition.seen.iter().any(|p| p.id == post.id);
            let in_new = partition.new.iter().any(|p| p.id == post.id);
            assert!(in_seen ^ in_new, "post {} in both or neither", post.id);
            assert_eq!(in_new, post.created_at > T0);
        }
    }

    #[test]
    fn test_partition_is_idempotent() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts = scenario_posts();

        assert_eq!(tracker.partition(&posts, 250), tracker.partition(&posts, 250));
    }

    #[test]
    fn test_partition_iter_over_filtered_view() {
        let (tracker, _) = make_tracker(T0, T0);
        let posts = scenario_posts();

        let partition = tracker.partition_iter(posts.iter().filter(|p| p.id != "2"), 250);
        assert_eq!(ids(&partition.seen), vec!["1"]);
        assert_eq!(ids(&partition.new), vec!["3"]);
    }

    #[test]
    fn test_advance_notifies_subscribers() {
        let (mut tracker, _) = make_tracker(T0, T0);
        let rx = tracker.subscribe();

        tracker.advance_watermark(WatermarkTarget::At(T0 + 5)).unwrap();
        assert!(tracker.advance_watermark(WatermarkTarget::At(T0)).is_err());

        assert_eq!(
            rx.try_recv().unwrap(),
            FeedEvent::WatermarkAdvanced {
                previous: T0,
                watermark: T0 + 5
            }
        );
        // Rejected advances publish nothing
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_starting_now() {
        let clock = Arc::new(ManualClock::new(T0));
        let tracker = FeedFreshnessTracker::starting_now(clock);
        assert_eq!(tracker.watermark(), T0);
    }
}
