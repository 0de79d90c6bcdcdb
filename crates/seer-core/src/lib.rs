// UniFFI scaffolding for generating Swift/Kotlin bindings
uniffi::setup_scaffolding!();

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod feed;
pub mod ffi;
pub mod models;
pub mod store;
pub mod tracing_setup;

// Re-export the session-facing types at crate root for convenience
pub use error::FeedError;
pub use feed::{FeedFreshnessTracker, FeedSession};
pub use ffi::SeerCore;
