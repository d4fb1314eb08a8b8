//! Soundstage Playback
//!
//! Background render-then-play control for Soundstage.
//!
//! The [`PlaybackController`] owns the loaded buffer and the render pipeline.
//! `play()` snapshots both and hands them to a worker thread, which renders the
//! whole buffer, converts it to 16-bit and submits it to a
//! [`PlaybackBackend`](soundstage_core::PlaybackBackend). The worker then polls
//! the backend until playback ends or the session is cancelled.
//!
//! # Features
//!
//! - `desktop`: CPAL output backend ([`CpalBackend`])
//!
//! # Example
//!
//! ```rust
//! use soundstage_core::{AudioBuffer, PlaybackBackend, PlaybackHandle, Result};
//! use soundstage_playback::{PlaybackController, PlaybackState};
//! use std::sync::Arc;
//!
//! struct Silent;
//! struct Done;
//!
//! impl PlaybackHandle for Done {
//!     fn is_playing(&self) -> bool { false }
//!     fn stop(&self) {}
//! }
//!
//! impl PlaybackBackend for Silent {
//!     fn submit(&self, _: Vec<i16>, _: u16, _: u32) -> Result<Box<dyn PlaybackHandle>> {
//!         Ok(Box::new(Done))
//!     }
//! }
//!
//! let mut controller = PlaybackController::new(Arc::new(Silent));
//! controller.load(AudioBuffer::silence(4_410, 44_100, 2));
//! controller.settings_mut().set_reverb(true, 0.5).unwrap();
//! controller.play().unwrap();
//! controller.stop();
//! assert_eq!(controller.state(), PlaybackState::Idle);
//! ```

mod cancel;
mod controller;
mod error;
mod events;
#[cfg(feature = "desktop")]
mod output;
mod types;

pub use cancel::CancellationToken;
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
#[cfg(feature = "desktop")]
pub use output::{CpalBackend, CpalHandle};
pub use types::{ControllerConfig, PlaybackState};
