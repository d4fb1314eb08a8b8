//! Documented parameter ranges and the clamp-at-the-setter policy
//!
//! Finite values outside a range are clamped (and logged) so the pipeline is
//! always renderable. Non-finite values cannot be clamped meaningfully and are
//! rejected.

use crate::error::{AudioError, Result};
use tracing::warn;

/// Inclusive range for one named parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Parameter name used in logs and errors
    pub name: &'static str,
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl ParamRange {
    /// Create a range
    pub const fn new(name: &'static str, min: f32, max: f32) -> Self {
        Self { name, min, max }
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into range, rejecting NaN and infinities
    pub fn clamp(&self, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(AudioError::InvalidParameter {
                name: self.name,
                value,
            });
        }
        if !self.contains(value) {
            let clamped = value.clamp(self.min, self.max);
            warn!(
                "{} = {} outside [{}, {}], clamped to {}",
                self.name, value, self.min, self.max, clamped
            );
            return Ok(clamped);
        }
        Ok(value)
    }
}

/// Equalizer band gain in dB
pub const EQ_GAIN_DB: ParamRange = ParamRange::new("eq_gain_db", -12.0, 12.0);
/// Surround intensity
pub const SURROUND_INTENSITY: ParamRange = ParamRange::new("surround_intensity", 0.0, 1.0);
/// 8D rotation speed in cycles per minute
pub const PANNER_SPEED: ParamRange = ParamRange::new("panner_speed", 5.0, 60.0);
/// Binaural beat frequency in Hz
pub const BINAURAL_BEAT_HZ: ParamRange = ParamRange::new("binaural_beat_hz", 5.0, 100.0);
/// Bass boost amount
pub const BASS_BOOST_AMOUNT: ParamRange = ParamRange::new("bass_boost_amount", 0.0, 1.0);
/// Reverb amount
pub const REVERB_AMOUNT: ParamRange = ParamRange::new("reverb_amount", 0.0, 1.0);

/// Volume is only required to be finite; clipping at render bounds the output
pub fn check_volume(volume: f32) -> Result<f32> {
    if volume.is_finite() {
        Ok(volume)
    } else {
        Err(AudioError::InvalidParameter {
            name: "volume",
            value: volume,
        })
    }
}
