//! Multi-tap reverb
//!
//! Five feed-forward echoes of the dry signal, spaced evenly and decaying
//! geometrically. Delay and decay both grow with `amount`; `amount = 0` still
//! produces 50 ms echoes at 0.3 decay.

use super::chain::Effect;
use soundstage_core::AudioBuffer;

/// Number of echo taps
pub const REVERB_TAPS: usize = 5;

/// Reverb effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reverb {
    amount: f32,
}

impl Reverb {
    /// Create a reverb with amount in [0, 1]
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    /// Reverb amount
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Spacing between taps in whole milliseconds
    pub fn delay_ms(&self) -> u32 {
        (50.0 + 150.0 * f64::from(self.amount)) as u32
    }

    /// Amplitude ratio between successive taps
    pub fn decay(&self) -> f64 {
        0.3 + 0.6 * f64::from(self.amount)
    }

    /// Tap spacing in frames at `sample_rate`
    pub fn base_delay_frames(&self, sample_rate: u32) -> usize {
        (u64::from(self.delay_ms()) * u64::from(sample_rate) / 1000) as usize
    }
}

impl Effect for Reverb {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        let channels = buffer.channels as usize;
        let frames = buffer.frames();
        if frames == 0 {
            return buffer.clone();
        }

        let base = self.base_delay_frames(buffer.sample_rate);
        let decay = self.decay();
        let mut output = buffer.clone();

        for tap in 1..=REVERB_TAPS {
            let delay = tap * base;
            // Taps that do not fit are dropped whole
            if delay == 0 || delay >= frames {
                continue;
            }
            let amplitude = decay.powi(tap as i32);
            let dry = &buffer.samples[..(frames - delay) * channels];
            let wet = &mut output.samples[delay * channels..frames * channels];
            for (out, &x) in wet.iter_mut().zip(dry.iter()) {
                *out = (f64::from(*out) + amplitude * f64::from(x)) as f32;
            }
        }

        output
    }

    fn name(&self) -> &'static str {
        "Reverb"
    }
}
