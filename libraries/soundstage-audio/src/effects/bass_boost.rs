//! Bass boost (low-shelf emulation)
//!
//! A zero-phase Butterworth low-pass at 150 Hz isolates the bass band, which is
//! added back scaled by `gain - 1`, where `gain` is `12 * amount` dB.

use super::chain::Effect;
use super::filters::Butterworth;
use soundstage_core::AudioBuffer;
use tracing::warn;

/// Shelf cutoff in Hz
pub const BASS_BOOST_CUTOFF_HZ: f64 = 150.0;

/// Boost at `amount = 1.0`, in dB
pub const BASS_BOOST_MAX_DB: f64 = 12.0;

/// Bass boost effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BassBoost {
    amount: f32,
}

impl BassBoost {
    /// Create a bass boost with amount in [0, 1]
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    /// Boost amount
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Linear gain applied to the bass band
    pub fn gain(&self) -> f64 {
        10.0f64.powf(BASS_BOOST_MAX_DB * f64::from(self.amount) / 20.0)
    }
}

impl Effect for BassBoost {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        if self.amount == 0.0 || buffer.is_empty() || buffer.channels == 0 {
            return buffer.clone();
        }

        let cutoff = BASS_BOOST_CUTOFF_HZ / (f64::from(buffer.sample_rate) / 2.0);
        let low_pass = match Butterworth::low_pass(cutoff) {
            Ok(filter) => filter,
            Err(e) => {
                // Sample rates at or below 300 Hz put the shelf above Nyquist
                warn!(
                    "Bass boost bypassed at {} Hz: {}",
                    buffer.sample_rate, e
                );
                return buffer.clone();
            }
        };

        let extra = self.gain() - 1.0;
        let mut output = buffer.clone();
        for channel in 0..buffer.channels as usize {
            let dry = buffer.channel(channel);
            let bass = low_pass.filtfilt_f32(&dry);
            let boosted: Vec<f32> = dry
                .iter()
                .zip(bass.iter())
                .map(|(&x, &lp)| (f64::from(x) + extra * lp) as f32)
                .collect();
            output.set_channel(channel, &boosted);
        }
        output
    }

    fn name(&self) -> &'static str {
        "Bass Boost"
    }
}
