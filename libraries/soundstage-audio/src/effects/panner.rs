//! Rotational ("8D") panner
//!
//! A slow sine sweeps the pan position across the stereo field. Each channel
//! is scaled by its own constant-power gain curve; nothing is mixed across
//! channels, so the effect attenuates rather than redistributes energy.

use super::chain::Effect;
use soundstage_core::AudioBuffer;
use std::f64::consts::PI;

/// Constant-power gains `(left, right)` for pan position `p` in [0, 1]
///
/// `p = 0.5` gives `sqrt(0.5)` on both sides.
pub fn pan_gains(position: f64) -> (f64, f64) {
    let p = position.clamp(0.0, 1.0);
    ((1.0 - p).sqrt(), p.sqrt())
}

/// Pan position at frame `n` for a sweep of `speed` cycles per minute
pub fn pan_position(n: usize, sample_rate: u32, speed: f32) -> f64 {
    let t = n as f64 / f64::from(sample_rate);
    0.5 + 0.5 * (2.0 * PI * (f64::from(speed) / 60.0) * t).sin()
}

/// 8D panner effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panner8d {
    speed: f32,
}

impl Panner8d {
    /// Create a panner rotating at `speed` cycles per minute
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Rotation speed in cycles per minute
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Effect for Panner8d {
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        if buffer.channels < 2 || buffer.sample_rate == 0 {
            return buffer.clone();
        }

        let mut output = buffer.clone();
        for (n, frame) in output
            .samples
            .chunks_exact_mut(buffer.channels as usize)
            .enumerate()
        {
            let (left_gain, right_gain) =
                pan_gains(pan_position(n, buffer.sample_rate, self.speed));
            frame[0] = (f64::from(frame[0]) * left_gain) as f32;
            frame[1] = (f64::from(frame[1]) * right_gain) as f32;
        }
        output
    }

    fn name(&self) -> &'static str {
        "8D Panner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_equal_power() {
        let (l, r) = pan_gains(0.5);
        assert_eq!(l, 0.5f64.sqrt());
        assert_eq!(r, 0.5f64.sqrt());
        assert!((l * l + r * r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn extremes() {
        assert_eq!(pan_gains(0.0), (1.0, 0.0));
        assert_eq!(pan_gains(1.0), (0.0, 1.0));
    }

    #[test]
    fn first_frame_is_centred() {
        let buffer = AudioBuffer::new(vec![1.0, 1.0, 1.0, 1.0], 44_100, 2);
        let out = Panner8d::new(30.0).apply(&buffer);
        let centre = 0.5f64.sqrt() as f32;
        assert_eq!(out.samples[0], centre);
        assert_eq!(out.samples[1], centre);
    }

    #[test]
    fn quarter_cycle_is_hard_right() {
        // 60 cycles/minute = 1 Hz; a quarter cycle later p = 1
        let sample_rate = 1_000;
        let buffer = AudioBuffer::new(vec![1.0; 2 * 1_000], sample_rate, 2);
        let out = Panner8d::new(60.0).apply(&buffer);
        assert!(out.samples[250 * 2].abs() < 1e-6);
        assert!((out.samples[250 * 2 + 1] - 1.0).abs() < 1e-6);
        // Three quarters: hard left
        assert!((out.samples[750 * 2] - 1.0).abs() < 1e-6);
        assert!(out.samples[750 * 2 + 1].abs() < 1e-6);
    }

    #[test]
    fn mono_is_untouched() {
        let buffer = AudioBuffer::new(vec![0.3; 100], 44_100, 1);
        assert_eq!(Panner8d::new(20.0).apply(&buffer), buffer);
    }

    #[test]
    fn power_is_preserved_for_equal_channels() {
        let buffer = AudioBuffer::new(vec![0.5; 2 * 4_410], 44_100, 2);
        let out = Panner8d::new(45.0).apply(&buffer);
        for frame in out.samples.chunks_exact(2) {
            let power = frame[0] * frame[0] + frame[1] * frame[1];
            assert!((power - 0.25).abs() < 1e-6);
        }
    }
}
