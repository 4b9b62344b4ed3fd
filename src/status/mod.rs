// src/status/mod.rs

//! Ephemeral user-facing status messages.
//!
//! Each named channel shows at most one message at a time. A message clears
//! itself after the configured delay; each `show` bumps the channel's
//! generation, so a timer left over from an earlier message never clears a
//! newer one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::types::Severity;

/// Default auto-hide delay for a shown message.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(5000);

struct ChannelState {
    message: String,
    severity: Severity,
    generation: u64,
}

/// Transient per-channel message surface.
///
/// Cloning is cheap; clones share the same channels. `show` spawns its
/// auto-hide timer on the current tokio runtime.
#[derive(Clone)]
pub struct StatusReporter {
    channels: Arc<Mutex<HashMap<String, ChannelState>>>,
    auto_hide: Duration,
}

impl StatusReporter {
    /// Creates a reporter with the given auto-hide delay.
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            auto_hide,
        }
    }

    /// Shows `message` on `channel` with the given severity class.
    ///
    /// The message replaces whatever the channel showed before and clears
    /// itself after the configured delay unless a newer message arrives
    /// first.
    pub fn show(&self, channel: &str, message: impl Into<String>, severity: Severity) {
        let generation = {
            let mut channels = self.channels.lock().unwrap();
            let state = channels.entry(channel.to_string()).or_insert(ChannelState {
                message: String::new(),
                severity,
                generation: 0,
            });
            state.message = message.into();
            state.severity = severity;
            state.generation += 1;
            state.generation
        };

        let channels = Arc::clone(&self.channels);
        let channel = channel.to_string();
        let delay = self.auto_hide;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut channels = channels.lock().unwrap();
            // A newer show() advanced the generation; leave its message alone.
            if channels.get(&channel).map(|s| s.generation) == Some(generation) {
                channels.remove(&channel);
            }
        });
    }

    /// Clears a channel immediately.
    pub fn hide(&self, channel: &str) {
        self.channels.lock().unwrap().remove(channel);
    }

    /// Returns the currently visible message and severity of a channel.
    pub fn current(&self, channel: &str) -> Option<(String, Severity)> {
        self.channels
            .lock()
            .unwrap()
            .get(channel)
            .map(|state| (state.message.clone(), state.severity))
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_HIDE)
    }
}
