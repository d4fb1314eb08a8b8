//! Soundstage Audio
//!
//! Offline DSP processing for Soundstage.
//!
//! This crate provides:
//! - PCM normalization into stereo f32 buffers (`load_buffer`)
//! - A 10-band STFT equalizer with overlap-add reconstruction
//! - Spatial effects: stereo surround, rotational ("8D") panning, binaural beats
//! - Dynamic effects: bass boost shelving, multi-tap reverb
//! - A deterministic render pipeline composing all of the above
//! - WAV output through hound, plus a waveform preview helper
//!
//! Every stage takes a buffer by reference and returns a new one; nothing holds
//! state between calls.
//!
//! # Example
//!
//! ```rust
//! use soundstage_audio::pcm::{load_buffer, PcmSamples};
//! use soundstage_audio::pipeline::{EqPreset, Pipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Two seconds of 16-bit mono silence
//! let buffer = load_buffer(PcmSamples::I16(vec![0; 88_200]), 44_100, 1)?;
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.settings_mut().apply_eq_preset(EqPreset::VShape);
//! pipeline.settings_mut().set_reverb(true, 0.4)?;
//! pipeline.settings_mut().set_volume(0.8)?;
//!
//! let rendered = pipeline.render(&buffer);
//! assert_eq!(rendered.frames(), buffer.frames());
//! # Ok(())
//! # }
//! ```

pub mod effects;
mod error;
pub mod params;
pub mod pcm;
pub mod pipeline;
pub mod preview;
pub mod wav;

pub use error::{AudioError, Result};
pub use pipeline::{render, Pipeline, PipelineSettings};
