//! Binaural beat generator
//!
//! Mixes a 200 Hz tone into the left channel and a `200 + beat` Hz tone into
//! the right channel. The listener perceives the difference as a beat.

use super::chain::Effect;
use soundstage_core::AudioBuffer;
use std::f64::consts::PI;

/// Carrier frequency of the left tone (Hz)
pub const BINAURAL_BASE_HZ: f64 = 200.0;

/// Peak amplitude of each generated tone
pub const BINAURAL_TONE_LEVEL: f64 = 0.2;

/// Level of the original program under the tones
pub const BINAURAL_DRY_LEVEL: f64 = 0.8;

/// Binaural beat effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binaural {
    beat_hz: f32,
}

impl Binaural {
    /// Create a generator for a beat of `beat_hz` Hz
    pub fn new(beat_hz: f32) -> Self {
        Self { beat_hz }
    }

    /// Beat frequency in Hz
    pub fn beat_hz(&self) -> f32 {
        self.beat_hz
    }
}

impl Effect for Binaural {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        if buffer.sample_rate == 0 || buffer.channels == 0 {
            return buffer.clone();
        }

        // Mono sources feed both channels
        let left = buffer.channel(0);
        let right = if buffer.channels == 1 {
            left.clone()
        } else {
            buffer.channel(1)
        };

        let sample_rate = f64::from(buffer.sample_rate);
        let right_hz = BINAURAL_BASE_HZ + f64::from(self.beat_hz);

        let mut samples = Vec::with_capacity(left.len() * 2);
        for (n, (&l, &r)) in left.iter().zip(right.iter()).enumerate() {
            let t = n as f64 / sample_rate;
            let tone_left = BINAURAL_TONE_LEVEL * (2.0 * PI * BINAURAL_BASE_HZ * t).sin();
            let tone_right = BINAURAL_TONE_LEVEL * (2.0 * PI * right_hz * t).sin();
            samples.push((BINAURAL_DRY_LEVEL * f64::from(l) + tone_left) as f32);
            samples.push((BINAURAL_DRY_LEVEL * f64::from(r) + tone_right) as f32);
        }

        AudioBuffer::new(samples, buffer.sample_rate, 2)
    }

    fn name(&self) -> &'static str {
        "Binaural"
    }
}
