/// Audio-related types
use serde::{Deserialize, Serialize};

/// Audio buffer containing decoded samples
///
/// Samples are stored as f32 in the range [-1.0, 1.0]
/// Interleaved format: [L, R, L, R, ...] for stereo
///
/// Buffers are value-like: every processing stage produces a new buffer
/// instead of aliasing its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioBuffer {
    /// Audio samples (f32, interleaved)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Create a silent buffer with `frames` frames
    pub fn silence(frames: usize, sample_rate: u32, channels: u16) -> Self {
        Self::new(vec![0.0; frames * channels as usize], sample_rate, channels)
    }

    /// Build an interleaved stereo buffer from two planar channels
    ///
    /// The shorter channel decides the frame count.
    pub fn from_channels(left: &[f32], right: &[f32], sample_rate: u32) -> Self {
        let frames = left.len().min(right.len());
        let mut samples = Vec::with_capacity(frames * 2);
        for (&l, &r) in left.iter().zip(right.iter()) {
            samples.push(l);
            samples.push(r);
        }
        Self::new(samples, sample_rate, 2)
    }

    /// Get the number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Get the duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Copy one channel out as a planar vector
    ///
    /// Returns an empty vector when `index` is not a valid channel.
    pub fn channel(&self, index: usize) -> Vec<f32> {
        let channels = self.channels as usize;
        if index >= channels {
            return Vec::new();
        }
        self.samples
            .chunks_exact(channels)
            .map(|frame| frame[index])
            .collect()
    }

    /// Overwrite one channel from a planar slice
    ///
    /// Extra input samples are ignored; missing ones leave the buffer untouched.
    pub fn set_channel(&mut self, index: usize, data: &[f32]) {
        let channels = self.channels as usize;
        if index >= channels {
            return;
        }
        for (frame, &value) in self.samples.chunks_exact_mut(channels).zip(data.iter()) {
            frame[index] = value;
        }
    }

    /// Check that every sample is finite
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_buffer_frames_calculation() {
        // 8 samples with 2 channels = 4 frames
        let buffer = AudioBuffer::new(vec![0.0; 8], 44_100, 2);
        assert_eq!(buffer.frames(), 4);
        assert_eq!(buffer.len(), 8);
    }

    #[test]
    fn audio_buffer_duration() {
        // 88200 samples with 2 channels = 44100 frames = 1 second
        let buffer = AudioBuffer::new(vec![0.0; 88_200], 44_100, 2);
        assert!((buffer.duration_secs() - 1.0).abs() < 0.01);
    }

    #[test]
    fn zero_channels_has_no_frames() {
        let buffer = AudioBuffer::new(vec![0.0; 4], 44_100, 0);
        assert_eq!(buffer.frames(), 0);
        assert!(buffer.channel(0).is_empty());
    }

    #[test]
    fn from_channels_interleaves() {
        let buffer = AudioBuffer::from_channels(&[1.0, 2.0, 3.0], &[-1.0, -2.0], 48_000);
        assert_eq!(buffer.samples, vec![1.0, -1.0, 2.0, -2.0]);
        assert_eq!(buffer.channels, 2);
        assert_eq!(buffer.sample_rate, 48_000);
    }

    #[test]
    fn channel_round_trip() {
        let mut buffer = AudioBuffer::from_channels(&[0.1, 0.2], &[0.3, 0.4], 44_100);
        assert_eq!(buffer.channel(0), vec![0.1, 0.2]);
        assert_eq!(buffer.channel(1), vec![0.3, 0.4]);
        assert!(buffer.channel(2).is_empty());

        buffer.set_channel(1, &[0.9, 0.8]);
        assert_eq!(buffer.samples, vec![0.1, 0.9, 0.2, 0.8]);
    }

    #[test]
    fn silence_is_zeroed() {
        let buffer = AudioBuffer::silence(10, 44_100, 2);
        assert_eq!(buffer.len(), 20);
        assert!(buffer.samples.iter().all(|&s| s == 0.0));
        assert!(buffer.is_finite());
    }
}
