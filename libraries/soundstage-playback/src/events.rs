//! Playback Events
//!
//! Emitted by the controller and its worker so a UI can follow the session
//! without polling:
//! - State changes (Idle / Rendering / Playing)
//! - Natural completion
//! - Failures surfaced from the worker thread

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// Playback reached the end of the rendered buffer
    Finished,

    /// A session failed; the controller is back to Idle
    Error {
        /// Error message
        message: String,
    },
}
