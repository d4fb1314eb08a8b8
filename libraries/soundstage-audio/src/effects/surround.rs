//! Stereo surround widening
//!
//! Each channel is high-passed at half Nyquist (zero-phase), and the difference
//! between the two high bands is fed back crosswise:
//!
//! - `L' = L + intensity * (right_high - left_high)`
//! - `R' = R + intensity * (left_high - right_high)`

use super::chain::Effect;
use super::filters::Butterworth;
use soundstage_core::AudioBuffer;
use tracing::warn;

/// Normalized cutoff (fraction of Nyquist) for the high band split
pub const SURROUND_CUTOFF: f64 = 0.5;

/// Stereo surround effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surround {
    intensity: f32,
}

impl Surround {
    /// Create a surround effect with intensity in [0, 1]
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }

    /// Current intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl Effect for Surround {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        if buffer.channels < 2 || buffer.is_empty() || self.intensity == 0.0 {
            return buffer.clone();
        }

        let high_pass = match Butterworth::high_pass(SURROUND_CUTOFF) {
            Ok(filter) => filter,
            Err(e) => {
                warn!("Surround bypassed: {}", e);
                return buffer.clone();
            }
        };

        let left = buffer.channel(0);
        let right = buffer.channel(1);
        let left_high = high_pass.filtfilt_f32(&left);
        let right_high = high_pass.filtfilt_f32(&right);

        let intensity = f64::from(self.intensity);
        let mut output = buffer.clone();
        for (n, frame) in output
            .samples
            .chunks_exact_mut(buffer.channels as usize)
            .enumerate()
        {
            let side = right_high[n] - left_high[n];
            frame[0] = (f64::from(left[n]) + intensity * side) as f32;
            frame[1] = (f64::from(right[n]) - intensity * side) as f32;
        }
        output
    }

    fn name(&self) -> &'static str {
        "Surround"
    }
}
