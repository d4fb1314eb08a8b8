//! Second-order Butterworth filters with zero-phase (forward-backward) runs
//!
//! Coefficients come from `biquad` (RBJ design with Q = 1/sqrt(2), which for a
//! second-order section is the bilinear-transformed Butterworth prototype).
//! Filtering runs in f64 over a whole channel: the signal is extended at both
//! ends by odd reflection, filtered forward with steady-state initial
//! conditions, then filtered again in reverse, and the extension is cut off.

use crate::error::{AudioError, Result};
use biquad::{Coefficients, ToHertz, Type, Q_BUTTERWORTH_F64};

/// Samples of odd reflection added at each end before filtering
/// (three times the number of taps of a biquad)
const PAD_LEN: usize = 9;

/// Butterworth response type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Passes content below the cutoff
    LowPass,
    /// Passes content above the cutoff
    HighPass,
}

/// Second-order Butterworth section
///
/// `b` holds the feed-forward taps, `a` the feedback taps with `a[0] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Butterworth {
    b: [f64; 3],
    a: [f64; 3],
}

impl Butterworth {
    /// Design a filter with `cutoff` normalized to Nyquist (exclusive 0..1)
    ///
    /// # Errors
    /// Returns `AudioError::Filter` if the cutoff is outside (0, 1).
    pub fn new(kind: FilterKind, cutoff: f64) -> Result<Self> {
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(AudioError::Filter(format!(
                "normalized cutoff {cutoff} outside (0, 1)"
            )));
        }

        let filter_type = match kind {
            FilterKind::LowPass => Type::LowPass,
            FilterKind::HighPass => Type::HighPass,
        };

        // Design at fs = 2 so that the cutoff is already in Nyquist units
        let coeffs = Coefficients::<f64>::from_params(
            filter_type,
            2.0_f64.hz(),
            cutoff.hz(),
            Q_BUTTERWORTH_F64,
        )
        .map_err(|e| AudioError::Filter(format!("{e:?}")))?;

        Ok(Self {
            b: [coeffs.b0, coeffs.b1, coeffs.b2],
            a: [1.0, coeffs.a1, coeffs.a2],
        })
    }

    /// Low-pass at `cutoff` (normalized to Nyquist)
    pub fn low_pass(cutoff: f64) -> Result<Self> {
        Self::new(FilterKind::LowPass, cutoff)
    }

    /// High-pass at `cutoff` (normalized to Nyquist)
    pub fn high_pass(cutoff: f64) -> Result<Self> {
        Self::new(FilterKind::HighPass, cutoff)
    }

    /// Feed-forward coefficients `[b0, b1, b2]`
    pub fn b(&self) -> [f64; 3] {
        self.b
    }

    /// Feedback coefficients `[1, a1, a2]`
    pub fn a(&self) -> [f64; 3] {
        self.a
    }

    /// Filter state that a unit step settles into (transposed direct form II)
    fn step_state(&self) -> [f64; 2] {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;
        let dc_gain = (b0 + b1 + b2) / (1.0 + a1 + a2);
        let z2 = b2 - a2 * dc_gain;
        let z1 = b1 - a1 * dc_gain + z2;
        [z1, z2]
    }

    /// Single causal pass starting from state `zi`
    fn run(&self, input: &[f64], zi: [f64; 2]) -> Vec<f64> {
        let [b0, b1, b2] = self.b;
        let [_, a1, a2] = self.a;
        let [mut z1, mut z2] = zi;

        input
            .iter()
            .map(|&x| {
                let y = b0 * x + z1;
                z1 = b1 * x - a1 * y + z2;
                z2 = b2 * x - a2 * y;
                y
            })
            .collect()
    }

    /// Zero-phase filtering of one channel
    ///
    /// Output has the same length as the input and no group delay; the
    /// magnitude response is the square of the single-pass response.
    pub fn filtfilt(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        if n == 0 {
            return Vec::new();
        }

        let edge = PAD_LEN.min(n - 1);
        let extended = odd_extend(input, edge);
        let zi = self.step_state();

        let first = extended[0];
        let mut forward = self.run(&extended, [zi[0] * first, zi[1] * first]);
        forward.reverse();

        let last = forward[0];
        let mut backward = self.run(&forward, [zi[0] * last, zi[1] * last]);
        backward.reverse();

        backward[edge..edge + n].to_vec()
    }

    /// Zero-phase filtering of an f32 channel
    pub fn filtfilt_f32(&self, input: &[f32]) -> Vec<f64> {
        let widened: Vec<f64> = input.iter().map(|&s| f64::from(s)).collect();
        self.filtfilt(&widened)
    }
}

/// Extend `x` by `edge` samples at both ends with odd symmetry around the end points
fn odd_extend(x: &[f64], edge: usize) -> Vec<f64> {
    let n = x.len();
    let mut out = Vec::with_capacity(n + 2 * edge);

    let first = x[0];
    for i in (1..=edge).rev() {
        out.push(2.0 * first - x[i]);
    }
    out.extend_from_slice(x);
    let last = x[n - 1];
    for i in 1..=edge {
        out.push(2.0 * last - x[n - 1 - i]);
    }

    out
}
