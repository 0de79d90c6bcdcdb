//! Application-wide constants
//!
//! Centralized location for feed tuning values and Nostr kinds
//! that are used across multiple modules.

/// Number of already-seen posts the home feed renders at most
pub const DEFAULT_SEEN_LIMIT: usize = 250;

/// Avatars shown in the "new posts" toast
pub const DEFAULT_TOAST_AVATAR_COUNT: usize = 3;

/// File holding the persisted last-seen watermark
pub const FEED_STATE_FILE: &str = "feed_state.json";

/// Env var overriding the base data directory
pub const BASE_DIR_ENV: &str = "SEER_BASE_DIR";

/// Env var enabling file logging
pub const LOG_FILE_ENV: &str = "SEER_LOG_FILE";

// Nostr event kinds consumed by the feed
pub mod kinds {
    /// Text note
    pub const TEXT_NOTE: u16 = 1;
    /// Contact list (NIP-02), source of the follow list
    pub const CONTACT_LIST: u16 = 3;
}

/// Path extensions treated as inline images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Path extensions treated as inline videos
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm"];
