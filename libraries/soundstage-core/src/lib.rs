//! Soundstage Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for
//! Soundstage.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Data**: `AudioBuffer` (interleaved f32 samples + sample rate + channel count)
//! - **Collaborator traits**: `PlaybackBackend`/`PlaybackHandle` for audio output,
//!   `AudioEncoder` for writing rendered buffers
//! - **Error Handling**: unified `SoundstageError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundstage_core::AudioBuffer;
//!
//! let buffer = AudioBuffer::from_channels(&[0.0, 0.5], &[0.0, -0.5], 44_100);
//! assert_eq!(buffer.frames(), 2);
//! assert_eq!(buffer.channels, 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, SoundstageError};
pub use traits::{AudioEncoder, PlaybackBackend, PlaybackHandle};
pub use types::AudioBuffer;
