use std::fs::OpenOptions;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::constants::LOG_FILE_ENV;

/// Install the global subscriber: stderr filtered by `RUST_LOG` (default
/// `info`), plus a DEBUG file layer when `SEER_LOG_FILE` is set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let file = std::env::var(LOG_FILE_ENV).ok().and_then(|log_path| {
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", log_path, e);
                None
            }
        }
    });

    let result = match file {
        Some(file) => {
            let file_layer = fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);
            registry.with(file_layer).try_init()
        }
        None => registry.try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing initialized");
    }
}
