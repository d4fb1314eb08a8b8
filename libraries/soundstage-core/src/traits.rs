/// Collaborator traits for Soundstage
///
/// The processing core never talks to audio devices or files directly. Output
/// devices and file writers are plugged in through these traits.
use crate::error::Result;
use crate::types::AudioBuffer;
use std::path::Path;

/// Handle to a block of audio submitted to a playback backend
pub trait PlaybackHandle: Send {
    /// Whether the backend is still playing the submitted block
    fn is_playing(&self) -> bool;

    /// Halt playback of the submitted block immediately
    fn stop(&self);
}

/// Playback backend trait
///
/// Implementers play a finished block of 16-bit interleaved samples.
pub trait PlaybackBackend: Send + Sync {
    /// Submit a block of interleaved i16 samples for playback
    ///
    /// # Errors
    /// Returns an error if the backend cannot start playback
    fn submit(
        &self,
        samples: Vec<i16>,
        channels: u16,
        sample_rate: u32,
    ) -> Result<Box<dyn PlaybackHandle>>;
}

/// Audio encoder trait
///
/// Implementers write a rendered buffer to `path` at the buffer's sample rate.
/// Format selection is the implementer's responsibility.
pub trait AudioEncoder {
    /// Encode `buffer` into the file at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    fn encode(&self, buffer: &AudioBuffer, path: &Path) -> Result<()>;
}
