//! Feed freshness: the last-seen watermark, the seen/new split it induces,
//! and the session that maps UI gestures onto it.

pub mod bus;
pub mod clock;
pub mod session;
pub mod summary;
pub mod tracker;

pub use bus::FeedEventBus;
pub use clock::{Clock, SystemClock};
pub use session::{FeedSession, FeedSnapshot};
pub use summary::NewPostsSummary;
pub use tracker::{FeedFreshnessTracker, Partition, WatermarkTarget};
