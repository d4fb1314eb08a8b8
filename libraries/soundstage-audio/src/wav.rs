//! WAV file input and output using hound
//!
//! `WavEncoder` is the default `AudioEncoder`: it writes 32-bit float WAV at
//! the buffer's sample rate. `read_wav` decodes integer or float WAV into a
//! normalized stereo buffer through [`load_buffer`].

use crate::error::{AudioError, Result};
use crate::pcm::{load_buffer, PcmSamples};
use soundstage_core::{AudioBuffer, AudioEncoder};
use std::path::Path;
use tracing::{debug, info};

/// Writes rendered buffers as 32-bit float WAV files
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl WavEncoder {
    /// Create an encoder
    pub fn new() -> Self {
        Self
    }

    /// Write `buffer` to `path`
    pub fn write(&self, buffer: &AudioBuffer, path: &Path) -> Result<()> {
        if buffer.channels == 0 || buffer.sample_rate == 0 {
            return Err(AudioError::InvalidBuffer(format!(
                "cannot encode {} channels at {} Hz",
                buffer.channels, buffer.sample_rate
            )));
        }

        let spec = hound::WavSpec {
            channels: buffer.channels,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &buffer.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        info!(
            "Saved {} frames ({:.2}s) to {}",
            buffer.frames(),
            buffer.duration_secs(),
            path.display()
        );
        Ok(())
    }
}

impl AudioEncoder for WavEncoder {
    fn encode(&self, buffer: &AudioBuffer, path: &Path) -> soundstage_core::Result<()> {
        self.write(buffer, path).map_err(Into::into)
    }
}

/// Read a WAV file into a normalized stereo buffer
///
/// Integer files of 8, 16, 24 and 32 bits and 32-bit float files are
/// supported. 8-bit WAV data is unsigned on disk.
///
/// # Errors
/// `Wav` for unreadable files, `UnsupportedSampleWidth` for other bit depths.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    debug!(
        "Reading {}: {} ch, {} Hz, {} bits {:?}",
        path.display(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format
    );

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => PcmSamples::F32(
            reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
        ),
        (hound::SampleFormat::Int, 8) => PcmSamples::U8(
            reader
                .into_samples::<i8>()
                .map(|s| s.map(|v| (i16::from(v) + 128) as u8))
                .collect::<std::result::Result<_, _>>()?,
        ),
        (hound::SampleFormat::Int, 16) => PcmSamples::I16(
            reader
                .into_samples::<i16>()
                .collect::<std::result::Result<_, _>>()?,
        ),
        (hound::SampleFormat::Int, 24) => PcmSamples::I24(
            reader
                .into_samples::<i32>()
                .collect::<std::result::Result<_, _>>()?,
        ),
        (hound::SampleFormat::Int, 32) => PcmSamples::I32(
            reader
                .into_samples::<i32>()
                .collect::<std::result::Result<_, _>>()?,
        ),
        (_, bits) => return Err(AudioError::UnsupportedSampleWidth(bits / 8)),
    };

    load_buffer(samples, spec.sample_rate, spec.channels)
}
