use crate::models::FeedFilter;

/// Broadcast by the feed core to every subscriber (view layer, FFI callback).
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FeedEvent {
    /// The last-seen watermark moved; subscribers should re-partition
    WatermarkAdvanced { previous: u64, watermark: u64 },
    /// Number of posts newer than the watermark changed
    NewPostCountChanged { count: u64 },
    /// The list should scroll back to its first row
    ScrollToTop,
    /// Global/Following filter switched
    FilterChanged { filter: FeedFilter },
}

/// UI gestures the feed reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum UiEvent {
    /// User tapped the new-posts toast
    NewPostsTapped,
    /// Pull-to-refresh on the feed list
    PullToRefresh,
    /// The already-active home tab was tapped again
    TabReselected,
}

/// What the session did in response to a [`UiEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FeedAction {
    /// Watermark advanced; everything currently loaded is now seen
    MarkedSeen { watermark: u64 },
    /// List was mid-scroll, so only a scroll to top was requested
    ScrolledToTop,
    /// A pushed screen (profile, followers...) was popped instead
    PoppedNavigation,
    /// Nothing to do (hidden feed that is not at the top)
    Unchanged,
}
