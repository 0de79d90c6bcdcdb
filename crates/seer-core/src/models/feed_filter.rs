use serde::{Deserialize, Serialize};

use super::{FollowList, Post};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum FeedFilter {
    Global,
    Following,
}

impl Default for FeedFilter {
    fn default() -> Self {
        Self::Global
    }
}

impl FeedFilter {
    /// Navigation title for the feed
    pub fn label(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Following => "Following",
        }
    }

    pub fn matches(&self, post: &Post, follows: &FollowList) -> bool {
        match self {
            Self::Global => true,
            Self::Following => follows.contains(&post.pubkey),
        }
    }
}
