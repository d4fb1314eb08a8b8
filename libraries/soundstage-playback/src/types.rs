//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing rendering or playing
    #[default]
    Idle,

    /// Worker is rendering the buffer
    Rendering,

    /// Rendered audio has been submitted to the backend
    Playing,
}

impl PlaybackState {
    /// Whether a worker session is active
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}

/// Timing and queue configuration for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How often the worker polls the backend for completion and cancellation
    pub poll_interval: Duration,

    /// How long `stop()` waits for the worker to exit
    pub stop_timeout: Duration,

    /// Events kept for a slow or absent consumer; the oldest are dropped first
    pub event_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            stop_timeout: Duration::from_secs(1),
            event_capacity: 64,
        }
    }
}

impl ControllerConfig {
    /// Override the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the stop timeout
    pub fn with_stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    /// Override the event queue capacity (at least 1)
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }
}
