//! 10-band STFT Equalizer
//!
//! Shapes the spectrum of overlapping Hann-windowed frames and rebuilds the
//! signal by overlap-add:
//! - Frame size 2048, hop 512 (75% overlap)
//! - Hann window before the forward FFT and again after the inverse FFT
//! - Per-band raised-cosine gain curve around each band's FFT bin
//! - Per-band gain control (-12 to +12 dB)
//! - Preset support
//!
//! Frames start every hop while `start + FRAME_SIZE < len`, so a frame ending
//! exactly at the buffer end is not processed. Samples past the last processed
//! frame come out as silence, and a buffer of at most one frame is silent.

use super::chain::Effect;
use crate::error::{AudioError, Result};
use crate::params::EQ_GAIN_DB;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};
use soundstage_core::AudioBuffer;
use std::f64::consts::PI;

/// Band centre frequencies (Hz), in processing order
pub const EQ_BAND_FREQUENCIES: [u32; 10] = [32, 64, 125, 250, 500, 1000, 2000, 4000, 8000, 16000];

/// Number of equalizer bands
pub const EQ_BAND_COUNT: usize = EQ_BAND_FREQUENCIES.len();

/// STFT frame size in samples
pub const FRAME_SIZE: usize = 2048;

/// STFT hop size in samples
pub const HOP_SIZE: usize = FRAME_SIZE / 4;

/// Equalizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EqPreset {
    /// Flat - All bands at 0 dB
    #[default]
    Flat,

    /// Bass Boost - Enhanced low frequencies
    BassBoost,

    /// Treble Boost - Enhanced high frequencies
    TrebleBoost,

    /// V-Shape - Boosted lows and highs, reduced mids
    VShape,

    /// Vocal Boost - Enhanced mid frequencies for voice
    VocalBoost,
}

impl EqPreset {
    /// All presets, in display order
    pub const ALL: [EqPreset; 5] = [
        Self::Flat,
        Self::BassBoost,
        Self::TrebleBoost,
        Self::VShape,
        Self::VocalBoost,
    ];

    /// Get gain values for this preset, one per band
    pub fn gains(&self) -> [f32; EQ_BAND_COUNT] {
        match self {
            Self::Flat => [0.0; EQ_BAND_COUNT],
            Self::BassBoost => [10.0, 8.0, 6.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            Self::TrebleBoost => [0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 8.0, 10.0],
            Self::VShape => [6.0, 5.0, 3.0, 0.0, -2.0, -3.0, -1.0, 2.0, 4.0, 6.0],
            Self::VocalBoost => [-3.0, -2.0, -1.0, 1.0, 5.0, 6.0, 5.0, 2.0, 0.0, -2.0],
        }
    }

    /// Get preset name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::BassBoost => "Bass Boost",
            Self::TrebleBoost => "Treble Boost",
            Self::VShape => "V-Shape",
            Self::VocalBoost => "Vocal Boost",
        }
    }
}

/// Gain in dB for each of the 10 bands
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EqualizerSettings {
    gains_db: [f32; EQ_BAND_COUNT],
}

impl EqualizerSettings {
    /// All bands at 0 dB
    pub fn flat() -> Self {
        Self::default()
    }

    /// Settings from a preset
    pub fn from_preset(preset: EqPreset) -> Self {
        Self {
            gains_db: preset.gains(),
        }
    }

    /// Settings from explicit gains, clamped to [-12, 12] dB
    pub fn from_gains(gains_db: [f32; EQ_BAND_COUNT]) -> Result<Self> {
        let mut settings = Self::flat();
        for (index, &gain) in gains_db.iter().enumerate() {
            settings.set_band_gain(index, gain)?;
        }
        Ok(settings)
    }

    /// Band index for a centre frequency
    pub fn band_index(frequency: u32) -> Option<usize> {
        EQ_BAND_FREQUENCIES.iter().position(|&f| f == frequency)
    }

    /// Get gain for a band by centre frequency
    pub fn gain(&self, frequency: u32) -> Option<f32> {
        Self::band_index(frequency).map(|i| self.gains_db[i])
    }

    /// Get gain for a band by index
    pub fn band_gain(&self, index: usize) -> Option<f32> {
        self.gains_db.get(index).copied()
    }

    /// All gains in band order
    pub fn gains(&self) -> [f32; EQ_BAND_COUNT] {
        self.gains_db
    }

    /// Set gain for the band centred on `frequency`
    ///
    /// # Errors
    /// `InvalidParameter` if `frequency` is not one of the 10 band centres or
    /// `gain_db` is not finite.
    pub fn set_gain(&mut self, frequency: u32, gain_db: f32) -> Result<()> {
        let index = Self::band_index(frequency).ok_or(AudioError::InvalidParameter {
            name: "eq_band_frequency",
            value: frequency as f32,
        })?;
        self.set_band_gain(index, gain_db)
    }

    /// Set gain for a band by index
    pub fn set_band_gain(&mut self, index: usize, gain_db: f32) -> Result<()> {
        let gain_db = EQ_GAIN_DB.clamp(gain_db)?;
        let slot = self
            .gains_db
            .get_mut(index)
            .ok_or(AudioError::InvalidParameter {
                name: "eq_band_index",
                value: index as f32,
            })?;
        *slot = gain_db;
        Ok(())
    }

    /// (frequency, gain dB) pairs in ascending frequency order
    pub fn bands(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        EQ_BAND_FREQUENCIES.iter().copied().zip(self.gains_db.iter().copied())
    }

    /// Whether every band is at 0 dB
    pub fn is_flat(&self) -> bool {
        self.gains_db.iter().all(|&g| g == 0.0)
    }

    /// Reject values that could not have come through the setters
    /// (used after deserialization)
    pub(crate) fn sanitized(&self) -> Result<Self> {
        Self::from_gains(self.gains_db)
    }
}

/// Periodic Hann window
fn hann_window(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / size as f64).cos())
        .collect()
}

/// Overlap-add gain of a window applied twice at the given hop
///
/// This is `F/H` times the mean of the squared window, i.e. the constant
/// `sum_k w(n - kH)^2` for windows whose squared overlap sums to a constant.
fn overlap_add_gain(window: &[f64], hop: usize) -> f64 {
    window.iter().map(|w| w * w).sum::<f64>() / hop as f64
}

/// Per-bin multiplier for bins `0..=FRAME_SIZE/2`
///
/// Bands are folded in ascending frequency order, each multiplying the bins
/// within `[b - width, b + width]` of its centre bin `b` (with `width = b`) by
/// a raised-cosine blend between unity and the band's linear gain.
pub fn bin_gains(settings: &EqualizerSettings, sample_rate: u32) -> Vec<f64> {
    let bins = FRAME_SIZE / 2 + 1;
    let mut gains = vec![1.0f64; bins];
    if sample_rate == 0 {
        return gains;
    }

    let resolution = f64::from(sample_rate) / FRAME_SIZE as f64;

    for (frequency, gain_db) in settings.bands() {
        if gain_db == 0.0 {
            continue;
        }
        let gain_linear = 10.0f64.powf(f64::from(gain_db) / 20.0);
        let band_bin = (f64::from(frequency) / resolution) as usize;
        let width = band_bin;
        if width == 0 {
            continue;
        }

        let low = band_bin - width;
        let high = (band_bin + width).min(bins - 1);
        for (i, gain) in gains.iter_mut().enumerate().take(high + 1).skip(low) {
            let distance = (i as f64 - band_bin as f64) / width as f64;
            let transition = 0.5 * (1.0 + (distance * PI).cos());
            *gain *= transition * (gain_linear - 1.0) + 1.0;
        }
    }

    gains
}

/// STFT equalizer effect
#[derive(Debug, Clone, Default)]
pub struct Equalizer {
    settings: EqualizerSettings,
}

impl Equalizer {
    /// Create an equalizer with the given band settings
    pub fn new(settings: EqualizerSettings) -> Self {
        Self { settings }
    }

    /// Current band settings
    pub fn settings(&self) -> &EqualizerSettings {
        &self.settings
    }

    /// Equalize one planar channel
    fn process_channel(
        input: &[f32],
        gains: &[f64],
        window: &[f64],
        planner: &mut FftPlanner<f64>,
    ) -> Vec<f32> {
        let len = input.len();
        if len <= FRAME_SIZE {
            return vec![0.0; len];
        }
        let mut output = vec![0.0f64; len];

        let fft = planner.plan_fft_forward(FRAME_SIZE);
        let ifft = planner.plan_fft_inverse(FRAME_SIZE);
        let mut spectrum = vec![Complex::new(0.0f64, 0.0); FRAME_SIZE];
        let inverse_scale = 1.0 / FRAME_SIZE as f64;
        let nyquist = FRAME_SIZE / 2;

        let mut start = 0;
        while start + FRAME_SIZE < len {
            for (j, bin) in spectrum.iter_mut().enumerate() {
                *bin = Complex::new(f64::from(input[start + j]) * window[j], 0.0);
            }

            fft.process(&mut spectrum);

            // Real multipliers on a bin and its mirror keep the spectrum Hermitian
            for (i, &gain) in gains.iter().enumerate() {
                spectrum[i] *= gain;
                if i != 0 && i != nyquist {
                    spectrum[FRAME_SIZE - i] *= gain;
                }
            }

            ifft.process(&mut spectrum);

            for (j, bin) in spectrum.iter().enumerate() {
                output[start + j] += bin.re * inverse_scale * window[j];
            }

            start += HOP_SIZE;
        }

        let norm = overlap_add_gain(window, HOP_SIZE);
        output.into_iter().map(|s| (s / norm) as f32).collect()
    }
}

impl Effect for Equalizer {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        if buffer.is_empty() || buffer.channels == 0 {
            return buffer.clone();
        }

        let gains = bin_gains(&self.settings, buffer.sample_rate);
        let window = hann_window(FRAME_SIZE);
        let mut planner = FftPlanner::new();

        let mut output = AudioBuffer::silence(buffer.frames(), buffer.sample_rate, buffer.channels);
        for channel in 0..buffer.channels as usize {
            let processed =
                Self::process_channel(&buffer.channel(channel), &gains, &window, &mut planner);
            output.set_channel(channel, &processed);
        }
        output
    }

    fn name(&self) -> &'static str {
        "10-Band Equalizer"
    }
}
