//! PCM normalization
//!
//! Turns decoded integer or float PCM into the stereo f32 `AudioBuffer` every
//! effect expects, and converts rendered buffers back to 16-bit for playback.
//!
//! Integer sources are rescaled with full-scale divisors:
//!
//! | width | divisor |
//! |-------|---------|
//! | 8-bit (unsigned) | 128, offset by -1.0 |
//! | 16-bit | 32768 |
//! | 24-bit | 8388608 |
//! | 32-bit | 2147483648 |

use crate::error::{AudioError, Result};
use soundstage_core::AudioBuffer;
use tracing::debug;

/// Full-scale divisor for 8-bit samples
pub const FULL_SCALE_8: f32 = 128.0;
/// Full-scale divisor for 16-bit samples
pub const FULL_SCALE_16: f32 = 32_768.0;
/// Full-scale divisor for 24-bit samples
pub const FULL_SCALE_24: f32 = 8_388_608.0;
/// Full-scale divisor for 32-bit samples
pub const FULL_SCALE_32: f32 = 2_147_483_648.0;

/// Smallest signed 24-bit sample
pub const I24_MIN: i32 = -8_388_608;
/// Largest signed 24-bit sample
pub const I24_MAX: i32 = 8_388_607;

/// Scale used when converting f32 back to i16
const I16_SCALE: f32 = 32_767.0;

/// Decoded PCM samples, interleaved, in their source representation
#[derive(Debug, Clone, PartialEq)]
pub enum PcmSamples {
    /// Unsigned 8-bit (WAV convention, 128 = silence)
    U8(Vec<u8>),
    /// Signed 16-bit
    I16(Vec<i16>),
    /// Signed 24-bit, sign-extended into i32 (`I24_MIN..=I24_MAX`)
    I24(Vec<i32>),
    /// Signed 32-bit
    I32(Vec<i32>),
    /// Already-normalized float
    F32(Vec<f32>),
}

impl PcmSamples {
    /// Number of interleaved samples
    pub fn len(&self) -> usize {
        match self {
            Self::U8(s) => s.len(),
            Self::I16(s) => s.len(),
            Self::I24(s) | Self::I32(s) => s.len(),
            Self::F32(s) => s.len(),
        }
    }

    /// Check if there are no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rescale to f32 in [-1.0, 1.0]
    pub fn into_f32(self) -> Vec<f32> {
        match self {
            Self::U8(s) => s
                .into_iter()
                .map(|v| f32::from(v) / FULL_SCALE_8 - 1.0)
                .collect(),
            Self::I16(s) => s.into_iter().map(|v| f32::from(v) / FULL_SCALE_16).collect(),
            Self::I24(s) => s
                .into_iter()
                .map(|v| v.clamp(I24_MIN, I24_MAX) as f32 / FULL_SCALE_24)
                .collect(),
            Self::I32(s) => s.into_iter().map(|v| v as f32 / FULL_SCALE_32).collect(),
            Self::F32(s) => s.into_iter().map(|v| v.clamp(-1.0, 1.0)).collect(),
        }
    }
}

/// Normalize decoded PCM into a stereo f32 buffer
///
/// Mono is duplicated into both channels, anything wider than stereo keeps its
/// first two channels, and a trailing partial frame is dropped.
///
/// # Errors
/// Returns `InvalidBuffer` for a zero sample rate, zero channels, non-finite
/// float samples, or 24-bit samples outside the signed 24-bit range.
pub fn load_buffer(samples: PcmSamples, sample_rate: u32, channels: u16) -> Result<AudioBuffer> {
    if sample_rate == 0 {
        return Err(AudioError::InvalidBuffer("sample rate must be positive".into()));
    }
    if channels == 0 {
        return Err(AudioError::InvalidBuffer("channel count must be positive".into()));
    }
    match &samples {
        PcmSamples::F32(s) if s.iter().any(|v| !v.is_finite()) => {
            return Err(AudioError::InvalidBuffer("non-finite float sample".into()));
        }
        PcmSamples::I24(s) => {
            if let Some(v) = s.iter().find(|v| !(I24_MIN..=I24_MAX).contains(*v)) {
                return Err(AudioError::InvalidBuffer(format!(
                    "24-bit sample {v} outside [{I24_MIN}, {I24_MAX}]"
                )));
            }
        }
        _ => {}
    }

    let source_channels = channels as usize;
    let floats = samples.into_f32();
    let frames = floats.len() / source_channels;

    let mut stereo = Vec::with_capacity(frames * 2);
    for frame in floats.chunks_exact(source_channels) {
        let left = frame[0];
        let right = if source_channels == 1 { frame[0] } else { frame[1] };
        stereo.push(left);
        stereo.push(right);
    }

    debug!(
        "Loaded {} frames at {} Hz ({} source channels)",
        frames, sample_rate, channels
    );

    Ok(AudioBuffer::new(stereo, sample_rate, 2))
}

/// Decode raw little-endian PCM bytes and normalize them
///
/// `sample_width` is in bytes: 1 (unsigned), 2, 3 or 4 (signed).
///
/// # Errors
/// Returns `UnsupportedSampleWidth` for any other width, otherwise the same
/// errors as [`load_buffer`].
pub fn load_pcm_bytes(
    bytes: &[u8],
    sample_width: u16,
    sample_rate: u32,
    channels: u16,
) -> Result<AudioBuffer> {
    let samples = match sample_width {
        1 => PcmSamples::U8(bytes.to_vec()),
        2 => PcmSamples::I16(
            bytes
                .chunks_exact(2)
                .map(|b| i16::from_le_bytes([b[0], b[1]]))
                .collect(),
        ),
        3 => PcmSamples::I24(
            bytes
                .chunks_exact(3)
                .map(|b| {
                    let sign = if b[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                    i32::from_le_bytes([b[0], b[1], b[2], sign])
                })
                .collect(),
        ),
        4 => PcmSamples::I32(
            bytes
                .chunks_exact(4)
                .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        ),
        other => return Err(AudioError::UnsupportedSampleWidth(other)),
    };

    load_buffer(samples, sample_rate, channels)
}

/// Convert a rendered buffer into 16-bit samples for playback
///
/// Each sample becomes `round(sample * 32767)`, saturated to the i16 range.
pub fn to_i16(buffer: &AudioBuffer) -> Vec<i16> {
    buffer
        .samples
        .iter()
        .map(|&s| (s * I16_SCALE).round().clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16)
        .collect()
}
