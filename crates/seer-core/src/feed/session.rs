use std::sync::mpsc::Receiver;
use std::sync::Arc;

use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::summary::NewPostsSummary;
use super::tracker::{FeedFreshnessTracker, WatermarkTarget};
use crate::config::CoreConfig;
use crate::error::Result;
use crate::events::{FeedAction, FeedEvent, UiEvent};
use crate::models::{FeedFilter, FollowList, Post};
use crate::store::WatermarkStore;

/// What the home feed renders right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSnapshot<'a> {
    pub seen: Vec<&'a Post>,
    pub new_posts: NewPostsSummary,
    pub filter: FeedFilter,
}

struct SessionState {
    tracker: FeedFreshnessTracker,
    filter: FeedFilter,
    follows: FollowList,
    /// Screens pushed on top of the feed (profile, following, followers)
    nav_depth: usize,
    at_top: bool,
    visible: bool,
    last_new_count: Option<u64>,
}

impl SessionState {
    fn request_scroll_to_top(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.tracker.publish(FeedEvent::ScrollToTop);
        true
    }

    fn publish_new_count(&mut self, count: u64) {
        if self.last_new_count != Some(count) {
            self.last_new_count = Some(count);
            self.tracker.publish(FeedEvent::NewPostCountChanged { count });
        }
    }
}

/// Handle to the feed state shared by every UI entry point of a session.
///
/// All reads and writes go through one lock, so a snapshot never observes a
/// watermark mid-advance.
pub struct FeedSession {
    config: CoreConfig,
    store: WatermarkStore,
    state: Mutex<SessionState>,
}

impl FeedSession {
    /// Resume from the persisted watermark, or start at the clock's "now".
    pub fn new(config: CoreConfig, clock: Arc<dyn Clock>) -> Self {
        let store = WatermarkStore::new(&config.data_dir);
        let tracker = match store.load() {
            Ok(Some(watermark)) => {
                tracing::info!(watermark, "resuming feed from persisted watermark");
                FeedFreshnessTracker::new(watermark, clock)
            }
            Ok(None) => FeedFreshnessTracker::starting_now(clock),
            Err(e) => {
                tracing::warn!("Failed to load feed watermark, starting fresh: {}", e);
                FeedFreshnessTracker::starting_now(clock)
            }
        };

        Self {
            config,
            store,
            state: Mutex::new(SessionState {
                tracker,
                filter: FeedFilter::default(),
                follows: FollowList::default(),
                nav_depth: 0,
                at_top: true,
                visible: true,
                last_new_count: None,
            }),
        }
    }

    pub fn with_system_clock(config: CoreConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn watermark(&self) -> u64 {
        self.state.lock().tracker.watermark()
    }

    pub fn subscribe(&self) -> Receiver<FeedEvent> {
        self.state.lock().tracker.subscribe()
    }

    /// Filter, partition and summarize `posts` (newest first).
    ///
    /// Publishes `NewPostCountChanged` whenever the unseen count differs from
    /// the last one published.
    pub fn snapshot<'a>(&self, posts: &'a [Post]) -> FeedSnapshot<'a> {
        let mut state = self.state.lock();
        let filter = state.filter;

        let partition = {
            let follows = &state.follows;
            state.tracker.partition_iter(
                posts.iter().filter(|p| filter.matches(p, follows)),
                self.config.seen_limit,
            )
        };
        let new_posts =
            NewPostsSummary::from_new_posts(&partition.new, self.config.toast_avatar_count);

        state.publish_new_count(new_posts.count);

        FeedSnapshot {
            seen: partition.seen,
            new_posts,
            filter,
        }
    }

    /// Recount unseen posts in `posts` without building a snapshot, publishing
    /// `NewPostCountChanged` if the count moved. Call after the feed source or
    /// the watermark changes so listeners learn about the toast.
    pub fn refresh_new_count(&self, posts: &[Post]) -> u64 {
        let mut state = self.state.lock();
        let filter = state.filter;
        let count = posts
            .iter()
            .filter(|p| filter.matches(p, &state.follows) && state.tracker.is_new(*p))
            .count() as u64;
        state.publish_new_count(count);
        count
    }

    /// Advance the watermark and persist it. Persistence failures are logged
    /// and do not fail the advance.
    pub fn advance_watermark(&self, target: WatermarkTarget) -> Result<u64> {
        let mut state = self.state.lock();
        self.advance_locked(&mut state, target)
    }

    fn advance_locked(&self, state: &mut SessionState, target: WatermarkTarget) -> Result<u64> {
        let watermark = state.tracker.advance_watermark(target)?;
        if let Err(e) = self.store.save(watermark) {
            tracing::error!("Failed to persist feed watermark: {}", e);
        }
        Ok(watermark)
    }

    pub fn handle_ui_event(&self, event: UiEvent) -> Result<FeedAction> {
        let mut state = self.state.lock();
        tracing::debug!(
            ?event,
            nav_depth = state.nav_depth,
            at_top = state.at_top,
            "feed ui event"
        );

        match event {
            UiEvent::NewPostsTapped | UiEvent::PullToRefresh => {
                let watermark = self.advance_locked(&mut state, WatermarkTarget::Now)?;
                state.request_scroll_to_top();
                Ok(FeedAction::MarkedSeen { watermark })
            }
            UiEvent::TabReselected => {
                if state.nav_depth > 0 {
                    state.nav_depth -= 1;
                    return Ok(FeedAction::PoppedNavigation);
                }
                if !state.at_top {
                    // A hidden list cannot be scrolled, so nothing happens
                    if state.request_scroll_to_top() {
                        return Ok(FeedAction::ScrolledToTop);
                    }
                    return Ok(FeedAction::Unchanged);
                }
                let watermark = self.advance_locked(&mut state, WatermarkTarget::Now)?;
                state.request_scroll_to_top();
                Ok(FeedAction::MarkedSeen { watermark })
            }
        }
    }

    // ===== UI state =====

    pub fn set_scroll_at_top(&self, at_top: bool) {
        self.state.lock().at_top = at_top;
    }

    pub fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    pub fn push_navigation(&self) {
        self.state.lock().nav_depth += 1;
    }

    pub fn navigation_depth(&self) -> usize {
        self.state.lock().nav_depth
    }

    pub fn filter(&self) -> FeedFilter {
        self.state.lock().filter
    }

    pub fn set_filter(&self, filter: FeedFilter) {
        let mut state = self.state.lock();
        if state.filter == filter {
            return;
        }
        state.filter = filter;
        tracing::info!(filter = filter.label(), "feed filter changed");
        state.tracker.publish(FeedEvent::FilterChanged { filter });
        state.request_scroll_to_top();
    }

    pub fn set_follow_list(&self, follows: FollowList) {
        tracing::debug!(count = follows.len(), "follow list updated");
        self.state.lock().follows = follows;
    }
}
