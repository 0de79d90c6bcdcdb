use std::path::{Path, PathBuf};

use crate::constants::{BASE_DIR_ENV, DEFAULT_SEEN_LIMIT, DEFAULT_TOAST_AVATAR_COUNT};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Upper bound on the rendered "seen" window
    pub seen_limit: usize,
    /// Distinct authors summarized in the new-posts toast
    pub toast_avatar_count: usize,
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            seen_limit: DEFAULT_SEEN_LIMIT,
            toast_avatar_count: DEFAULT_TOAST_AVATAR_COUNT,
        }
    }

    pub fn with_seen_limit(mut self, seen_limit: usize) -> Self {
        self.seen_limit = seen_limit;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

/// Resolve the data directory: `SEER_BASE_DIR` wins, then the platform data dir.
pub fn default_data_dir() -> PathBuf {
    if let Ok(base_dir) = std::env::var(BASE_DIR_ENV) {
        return PathBuf::from(base_dir);
    }
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("seer")
}
