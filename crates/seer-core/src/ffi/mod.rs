//! FFI module for UniFFI bindings
//!
//! Exposes the feed session to Swift/Kotlin. Keep this API simple: no async
//! functions, only basic types and records.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use nostr::{Event, JsonUtil};
use parking_lot::{Mutex, RwLock};

use crate::config::CoreConfig;
use crate::error::FeedError;
use crate::events::{FeedAction, FeedEvent, UiEvent};
use crate::feed::{FeedSession, NewPostsSummary, WatermarkTarget};
use crate::models::{FeedFilter, FollowList, Post};
use crate::store::FeedStore;

mod callback_api;
mod feed_api;

/// How long the callback listener waits for an event before re-checking
/// whether it should keep running.
const CALLBACK_POLL_INTERVAL_MS: u64 = 50;

/// Owned copy of a feed snapshot for foreign callers.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeedSnapshot {
    pub seen: Vec<Post>,
    pub new_posts: NewPostsSummary,
    pub filter: FeedFilter,
    /// Navigation title ("Global" / "Following")
    pub title: String,
}

/// Install the tracing subscriber. Call once at app launch.
#[uniffi::export]
pub fn init_logging() {
    crate::tracing_setup::init_tracing();
}

/// Callback interface for pushed feed events.
///
/// # Thread Safety
/// The callback is invoked from a background thread.
/// Swift implementations should dispatch to main thread for UI updates.
#[uniffi::export(callback_interface)]
pub trait FeedEventCallback: Send + Sync {
    fn on_feed_event(&self, event: FeedEvent);
}

/// Feed core exposed to foreign languages.
///
/// UniFFI objects are wrapped in Arc, so all mutation goes through locks.
#[derive(uniffi::Object)]
pub struct SeerCore {
    session: Arc<FeedSession>,
    feed: RwLock<FeedStore>,
    event_callback: Arc<RwLock<Option<Arc<dyn FeedEventCallback>>>>,
    callback_listener_running: Arc<AtomicBool>,
    callback_listener_handle: Mutex<Option<JoinHandle<()>>>,
}

impl SeerCore {
    pub fn from_session(session: FeedSession) -> Self {
        Self {
            session: Arc::new(session),
            feed: RwLock::new(FeedStore::new()),
            event_callback: Arc::new(RwLock::new(None)),
            callback_listener_running: Arc::new(AtomicBool::new(false)),
            callback_listener_handle: Mutex::new(None),
        }
    }

    /// Recount unseen posts so callback listeners hear about toast changes.
    fn refresh_new_count(&self) {
        let feed = self.feed.read();
        self.session.refresh_new_count(feed.posts());
    }

    fn spawn_callback_listener(&self) -> JoinHandle<()> {
        let running = self.callback_listener_running.clone();
        let callback_ref = self.event_callback.clone();
        let rx = self.session.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("feed callback listener started");
            while running.load(Ordering::Relaxed) {
                match rx.recv_timeout(Duration::from_millis(CALLBACK_POLL_INTERVAL_MS)) {
                    Ok(event) => {
                        let callback = callback_ref.read().clone();
                        if let Some(callback) = callback {
                            callback.on_feed_event(event);
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("feed callback listener stopped");
        })
    }
}

impl Drop for SeerCore {
    fn drop(&mut self) {
        self.callback_listener_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.callback_listener_handle.lock().take() {
            let _ = handle.join();
        }
    }
}

fn parse_event_json(json: &str) -> Result<Event, FeedError> {
    let event = Event::from_json(json).map_err(|e| FeedError::InvalidEvent {
        message: e.to_string(),
    })?;
    event.verify().map_err(|e| FeedError::InvalidEvent {
        message: format!("signature check failed: {}", e),
    })?;
    Ok(event)
}
