//! Shared test signal and analysis helpers
#![allow(dead_code)]

use soundstage_core::AudioBuffer;
use std::f32::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;

/// Mono sine of `amplitude` at `frequency`
pub fn generate_sine(frequency: f32, amplitude: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// Stereo buffer with the same sine in both channels
pub fn generate_sine_stereo(
    frequency: f32,
    amplitude: f32,
    sample_rate: u32,
    frames: usize,
) -> AudioBuffer {
    let sine = generate_sine(frequency, amplitude, sample_rate, frames);
    AudioBuffer::from_channels(&sine, &sine, sample_rate)
}

/// Deterministic white noise in [-amplitude, amplitude)
pub fn generate_noise(amplitude: f32, frames: usize, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..frames)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            amplitude * ((state as f32 / u32::MAX as f32) * 2.0 - 1.0)
        })
        .collect()
}

/// Stereo noise with independent channels
pub fn generate_noise_stereo(amplitude: f32, sample_rate: u32, frames: usize) -> AudioBuffer {
    let left = generate_noise(amplitude, frames, 0x1234_5678);
    let right = generate_noise(amplitude, frames, 0x9E37_79B9);
    AudioBuffer::from_channels(&left, &right, sample_rate)
}

/// Left channel of an interleaved stereo buffer
pub fn extract_left(buffer: &AudioBuffer) -> Vec<f32> {
    buffer.channel(0)
}

/// Right channel of an interleaved stereo buffer
pub fn extract_right(buffer: &AudioBuffer) -> Vec<f32> {
    buffer.channel(1)
}

/// Root mean square
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|x| x * x).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Largest absolute value
pub fn peak_value(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

/// Largest absolute difference between two equally long slices
pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b.iter())
        .fold(0.0f32, |m, (x, y)| m.max((x - y).abs()))
}
