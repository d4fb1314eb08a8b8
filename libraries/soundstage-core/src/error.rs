/// Core error types for Soundstage
use thiserror::Error;

/// Result type alias using `SoundstageError`
pub type Result<T> = std::result::Result<T, SoundstageError>;

/// Core error type for Soundstage
#[derive(Error, Debug)]
pub enum SoundstageError {
    /// An operation needed a loaded buffer and none was loaded
    #[error("No audio buffer loaded")]
    NoBufferLoaded,

    /// PCM sample width (in bytes) is not 1, 2, 3 or 4
    #[error("Unsupported sample width: {0} bytes")]
    UnsupportedSampleWidth(u16),

    /// A processing parameter could not be accepted (e.g. NaN)
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Malformed audio buffer
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    /// Failure surfaced by the playback backend
    #[error("Playback backend failure: {0}")]
    PlaybackBackend(String),

    /// Failure surfaced by the encoder
    #[error("Encode error: {0}")]
    Encode(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SoundstageError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter { name, value }
    }

    /// Create an invalid buffer error
    pub fn invalid_buffer(msg: impl Into<String>) -> Self {
        Self::InvalidBuffer(msg.into())
    }

    /// Create a playback backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::PlaybackBackend(msg.into())
    }

    /// Create an encode error
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
