use nostr::Timestamp;

/// Source of "now" for watermark advances.
pub trait Clock: Send + Sync {
    /// Current unix time in seconds
    fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        Timestamp::now().as_u64()
    }
}
