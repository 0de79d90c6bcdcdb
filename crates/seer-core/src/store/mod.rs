pub mod feed_store;
pub mod watermark_store;

pub use feed_store::FeedStore;
pub use watermark_store::WatermarkStore;
