pub mod feed_filter;
pub mod follow_list;
pub mod post;

pub use feed_filter::FeedFilter;
pub use follow_list::FollowList;
pub use post::{FeedItem, Post};
