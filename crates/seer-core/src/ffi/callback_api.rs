use super::*;

#[uniffi::export]
impl SeerCore {
    /// Register a callback to receive feed events.
    ///
    /// Only one callback can be registered at a time.
    /// Calling this again will replace the previous callback.
    pub fn set_event_callback(&self, callback: Box<dyn FeedEventCallback>) {
        let callback: Arc<dyn FeedEventCallback> = Arc::from(callback);
        // Held across the flag flip so a concurrent clear cannot join a live listener
        let mut handle_guard = self.callback_listener_handle.lock();
        *self.event_callback.write() = Some(callback);

        // Start listener thread if not already running
        if !self.callback_listener_running.swap(true, Ordering::SeqCst) {
            *handle_guard = Some(self.spawn_callback_listener());
        }
    }

    /// Clear the event callback and stop the listener thread.
    pub fn clear_event_callback(&self) {
        let mut handle_guard = self.callback_listener_handle.lock();
        *self.event_callback.write() = None;
        self.callback_listener_running.store(false, Ordering::SeqCst);
        if let Some(handle) = handle_guard.take() {
            let _ = handle.join();
        }
    }
}
