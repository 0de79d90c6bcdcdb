/// Errors that can occur during feed operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum FeedError {
    #[error("Invalid watermark: {requested} is earlier than current watermark {current}")]
    InvalidWatermark { requested: u64, current: u64 },
    #[error("Storage error: {message}")]
    Storage { message: String },
    #[error("Invalid event: {message}")]
    InvalidEvent { message: String },
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
