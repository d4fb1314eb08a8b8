//! Error types for playback control

use soundstage_audio::AudioError;
use soundstage_core::SoundstageError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The playback backend refused or failed a submission
    #[error("Playback backend failure: {0}")]
    Backend(String),

    /// The render/playback worker panicked
    #[error("Playback worker panicked: {0}")]
    WorkerPanicked(String),

    /// Worker thread could not be spawned
    #[error("Failed to spawn playback worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// Error from a core collaborator (encoder, backend)
    #[error(transparent)]
    Core(#[from] SoundstageError),

    /// Error from the DSP layer
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl PlaybackError {
    /// Message suitable for a `PlaybackEvent::Error`
    pub fn message(&self) -> String {
        self.to_string()
    }
}
