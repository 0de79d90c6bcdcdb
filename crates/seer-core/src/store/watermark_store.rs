use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::FEED_STATE_FILE;
use crate::error::{FeedError, Result};

#[derive(Debug, Serialize, Deserialize)]
struct FeedState {
    last_seen: u64,
}

/// Persists the last-seen watermark between sessions (JSON in the data dir).
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(FEED_STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored watermark. A missing file is not an error.
    pub fn load(&self) -> Result<Option<u64>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FeedError::Storage {
                    message: format!("Failed to read {}: {}", self.path.display(), e),
                })
            }
        };

        let state: FeedState = serde_json::from_str(&contents).map_err(|e| FeedError::Storage {
            message: format!("Failed to parse {}: {}", self.path.display(), e),
        })?;
        Ok(Some(state.last_seen))
    }

    pub fn save(&self, watermark: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FeedError::Storage {
                message: format!("Failed to create {}: {}", parent.display(), e),
            })?;
        }

        let json = serde_json::to_string_pretty(&FeedState {
            last_seen: watermark,
        })
        .map_err(|e| FeedError::Storage {
            message: e.to_string(),
        })?;

        fs::write(&self.path, json).map_err(|e| FeedError::Storage {
            message: format!("Failed to write {}: {}", self.path.display(), e),
        })
    }
}
