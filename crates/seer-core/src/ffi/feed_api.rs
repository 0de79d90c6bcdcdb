use super::*;

#[uniffi::export]
impl SeerCore {
    /// Open a feed session rooted at `data_dir`, resuming the persisted
    /// watermark if there is one.
    #[uniffi::constructor]
    pub fn new(data_dir: String) -> Arc<Self> {
        let session = FeedSession::with_system_clock(CoreConfig::new(data_dir));
        Arc::new(Self::from_session(session))
    }

    // =========================================================================
    // FEED SOURCE
    // =========================================================================

    /// Add a signed event (JSON) to the feed.
    /// Returns false if it was a duplicate or not a text note.
    pub fn ingest_event_json(&self, json: String) -> Result<bool, FeedError> {
        let event = parse_event_json(&json)?;
        let mut feed = self.feed.write();
        let added = feed.ingest_event(&event);
        if added {
            self.session.refresh_new_count(feed.posts());
        }
        Ok(added)
    }

    /// Replace the follow list from a signed kind:3 contact list (JSON).
    pub fn set_follow_list_json(&self, json: String) -> Result<(), FeedError> {
        let event = parse_event_json(&json)?;
        let follows = FollowList::from_event(&event).ok_or_else(|| FeedError::InvalidEvent {
            message: format!("expected contact list, got kind {}", event.kind.as_u16()),
        })?;
        self.session.set_follow_list(follows);
        self.refresh_new_count();
        Ok(())
    }

    // =========================================================================
    // FRESHNESS
    // =========================================================================

    /// Current seen window and new-posts toast summary.
    pub fn feed_snapshot(&self) -> FfiFeedSnapshot {
        let feed = self.feed.read();
        let snapshot = self.session.snapshot(feed.posts());
        FfiFeedSnapshot {
            seen: snapshot.seen.into_iter().cloned().collect(),
            new_posts: snapshot.new_posts,
            filter: snapshot.filter,
            title: snapshot.filter.label().to_string(),
        }
    }

    pub fn watermark(&self) -> u64 {
        self.session.watermark()
    }

    /// Advance the watermark to `to`, or to now when `None`.
    pub fn advance_watermark(&self, to: Option<u64>) -> Result<u64, FeedError> {
        let target = match to {
            Some(ts) => WatermarkTarget::At(ts),
            None => WatermarkTarget::Now,
        };
        let watermark = self.session.advance_watermark(target)?;
        self.refresh_new_count();
        Ok(watermark)
    }

    pub fn handle_ui_event(&self, event: UiEvent) -> Result<FeedAction, FeedError> {
        let action = self.session.handle_ui_event(event)?;
        if let FeedAction::MarkedSeen { .. } = action {
            self.refresh_new_count();
        }
        Ok(action)
    }

    // =========================================================================
    // UI STATE
    // =========================================================================

    pub fn set_filter(&self, filter: FeedFilter) {
        self.session.set_filter(filter);
        self.refresh_new_count();
    }

    pub fn set_scroll_at_top(&self, at_top: bool) {
        self.session.set_scroll_at_top(at_top);
    }

    pub fn set_visible(&self, visible: bool) {
        self.session.set_visible(visible);
    }

    /// A screen was pushed on top of the feed (profile, followers...).
    pub fn push_navigation(&self) {
        self.session.push_navigation();
    }
}
