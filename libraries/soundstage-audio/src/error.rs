/// Audio-specific errors
use soundstage_core::SoundstageError;
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug)]
pub enum AudioError {
    /// PCM sample width (in bytes) is not 1, 2, 3 or 4
    #[error("Unsupported sample width: {0} bytes")]
    UnsupportedSampleWidth(u16),

    /// Invalid audio buffer
    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    /// Parameter that cannot be clamped into range (NaN, infinity)
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Filter design error
    #[error("Filter error: {0}")]
    Filter(String),

    /// WAV codec error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Settings (de)serialization error
    #[error("Settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<AudioError> for SoundstageError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::UnsupportedSampleWidth(width) => Self::UnsupportedSampleWidth(width),
            AudioError::InvalidBuffer(msg) => Self::InvalidBuffer(msg),
            AudioError::InvalidParameter { name, value } => Self::InvalidParameter { name, value },
            AudioError::Io(err) => Self::Io(err),
            other => Self::Encode(other.to_string()),
        }
    }
}
