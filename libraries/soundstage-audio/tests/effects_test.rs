//! Integration tests for the individual effects
//!
//! Tests cover:
//! - Equalizer: flat identity, band boost/cut, preset shaping, boundary gap
//! - Panner: constant-power midpoint
//! - Reverb: tap positions and amplitudes at several sample rates
//! - Binaural: beat difference on silence
//! - Bass boost: shelf behaviour inside and outside the band
//! - Surround: mono pass-through, stereo widening

mod common;

use common::*;
use soundstage_audio::effects::{
    pan_gains, BassBoost, Binaural, Effect, EqPreset, Equalizer, EqualizerSettings, Panner8d,
    Reverb, Surround, FRAME_SIZE, HOP_SIZE,
};
use soundstage_core::AudioBuffer;

// ============================================================================
// EQUALIZER
// ============================================================================

#[test]
fn test_flat_eq_identity_on_noise() {
    let frames = 3 * SAMPLE_RATE as usize / 2;
    let buffer = generate_noise_stereo(0.8, SAMPLE_RATE, frames);
    let out = Equalizer::new(EqualizerSettings::flat()).apply(&buffer);

    let last_frame_start = (frames - FRAME_SIZE - 1) / HOP_SIZE * HOP_SIZE;
    let covered_end = last_frame_start + HOP_SIZE;
    let covered = (FRAME_SIZE - HOP_SIZE) * 2..covered_end * 2;

    let diff = max_abs_diff(&out.samples[covered.clone()], &buffer.samples[covered]);
    assert!(diff <= 1e-5, "flat EQ deviated by {diff}");
}

#[test]
fn test_eq_preserves_length_and_channels() {
    for frames in [0, 1, FRAME_SIZE - 1, FRAME_SIZE, FRAME_SIZE + 1, 10_000] {
        let buffer = generate_sine_stereo(440.0, 0.5, SAMPLE_RATE, frames);
        let out = Equalizer::new(EqualizerSettings::from_preset(EqPreset::VShape)).apply(&buffer);
        assert_eq!(out.frames(), frames);
        assert_eq!(out.channels, 2);
    }
}

#[test]
fn test_eq_cut_attenuates_band() {
    let buffer = generate_sine_stereo(125.0, 0.5, SAMPLE_RATE, SAMPLE_RATE as usize);
    let mut settings = EqualizerSettings::flat();
    settings.set_gain(125, -12.0).unwrap();
    let out = Equalizer::new(settings).apply(&buffer);

    let region = 8_000..36_000;
    let rms_in = calculate_rms(&extract_left(&buffer)[region.clone()]);
    let rms_out = calculate_rms(&extract_left(&out)[region]);
    // 125 Hz sits near bin 5.8; the band centre bin 5 gets the full cut
    assert!(rms_out < rms_in * 0.5, "in {rms_in} out {rms_out}");
}

#[test]
fn test_bass_preset_leaves_treble_alone() {
    let buffer = generate_sine_stereo(12_000.0, 0.5, SAMPLE_RATE, SAMPLE_RATE as usize / 2);
    let out = Equalizer::new(EqualizerSettings::from_preset(EqPreset::BassBoost)).apply(&buffer);

    let region = 4_096..18_000;
    let rms_in = calculate_rms(&extract_left(&buffer)[region.clone()]);
    let rms_out = calculate_rms(&extract_left(&out)[region]);
    assert!((rms_out / rms_in - 1.0).abs() < 0.01);
}

#[test]
fn test_eq_single_frame_buffer_is_silent() {
    let buffer = generate_sine_stereo(1_000.0, 0.5, SAMPLE_RATE, FRAME_SIZE);
    let out = Equalizer::new(EqualizerSettings::flat()).apply(&buffer);
    assert_eq!(out.frames(), FRAME_SIZE);
    assert!(out.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn test_eq_tail_is_zero() {
    let frames = FRAME_SIZE + 3 * HOP_SIZE + 200;
    let buffer = generate_sine_stereo(1_000.0, 0.5, SAMPLE_RATE, frames);
    let out = Equalizer::new(EqualizerSettings::flat()).apply(&buffer);

    let processed_end = FRAME_SIZE + 3 * HOP_SIZE;
    assert!(out.samples[processed_end * 2..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_overlapping_bands_compose_multiplicatively() {
    let mut both = EqualizerSettings::flat();
    both.set_gain(500, 6.0).unwrap();
    both.set_gain(1000, -6.0).unwrap();

    let mut low_only = EqualizerSettings::flat();
    low_only.set_gain(500, 6.0).unwrap();
    let mut high_only = EqualizerSettings::flat();
    high_only.set_gain(1000, -6.0).unwrap();

    let combined = soundstage_audio::effects::bin_gains(&both, SAMPLE_RATE);
    let low = soundstage_audio::effects::bin_gains(&low_only, SAMPLE_RATE);
    let high = soundstage_audio::effects::bin_gains(&high_only, SAMPLE_RATE);
    for i in 0..combined.len() {
        assert!((combined[i] - low[i] * high[i]).abs() < 1e-12);
    }
}

// ============================================================================
// SPATIAL
// ============================================================================

#[test]
fn test_panner_midpoint_gains() {
    let (left, right) = pan_gains(0.5);
    assert_eq!(left, right);
    assert_eq!(left, 0.5f64.sqrt());
}

#[test]
fn test_panner_attenuates_without_mixing() {
    let left = generate_sine(440.0, 0.5, SAMPLE_RATE, 4_410);
    let right = vec![0.0; 4_410];
    let buffer = AudioBuffer::from_channels(&left, &right, SAMPLE_RATE);
    let out = Panner8d::new(60.0).apply(&buffer);

    // Nothing leaks into the silent channel
    assert!(extract_right(&out).iter().all(|&s| s == 0.0));
    assert!(peak_value(&extract_left(&out)) <= 0.5);
}

#[test]
fn test_binaural_beat_on_silence() {
    let silent = AudioBuffer::new(vec![0.0; SAMPLE_RATE as usize], SAMPLE_RATE, 1);
    let out = Binaural::new(10.0).apply(&silent);
    assert_eq!(out.channels, 2);

    let left = extract_left(&out);
    let right = extract_right(&out);
    for n in (0..SAMPLE_RATE as usize).step_by(97) {
        let t = n as f64 / f64::from(SAMPLE_RATE);
        let expected = 0.2 * (2.0 * std::f64::consts::PI * 210.0 * t).sin()
            - 0.2 * (2.0 * std::f64::consts::PI * 200.0 * t).sin();
        assert!((f64::from(right[n] - left[n]) - expected).abs() < 1e-6);
    }
}

#[test]
fn test_surround_mono_is_untouched() {
    let buffer = AudioBuffer::new(generate_noise(0.5, 2_000, 7), SAMPLE_RATE, 1);
    assert_eq!(Surround::new(1.0).apply(&buffer), buffer);
}

#[test]
fn test_surround_feeds_left_highs_into_right() {
    let left = generate_noise(0.3, 8_192, 11);
    let buffer = AudioBuffer::from_channels(&left, &vec![0.0; 8_192], SAMPLE_RATE);
    let out = Surround::new(1.0).apply(&buffer);

    // Right picks up the upper half of the left spectrum
    let ratio = calculate_rms(&extract_right(&out)) / calculate_rms(&left);
    assert!(ratio > 0.4 && ratio < 0.9, "ratio {ratio}");
}

// ============================================================================
// DYNAMICS
// ============================================================================

#[test]
fn test_reverb_amount_zero_is_not_bypass() {
    for sample_rate in [22_050u32, 44_100, 48_000] {
        let frames = sample_rate as usize / 2;
        let mut impulse = vec![0.0; frames];
        impulse[0] = 1.0;
        let buffer = AudioBuffer::from_channels(&impulse, &impulse, sample_rate);
        let out = extract_left(&Reverb::new(0.0).apply(&buffer));

        let spacing = sample_rate as usize / 20; // 50 ms
        let expected = [0.3f32, 0.09, 0.027, 0.0081, 0.00243];
        for (i, amp) in expected.iter().enumerate() {
            let at = (i + 1) * spacing;
            assert!(
                (out[at] - amp).abs() < 1e-6,
                "{sample_rate} Hz tap {} = {}",
                i + 1,
                out[at]
            );
        }
    }
}

#[test]
fn test_reverb_full_amount_spacing() {
    // 200 ms at 8 kHz = 1600 frames; 2 s holds all five taps
    let mut impulse = vec![0.0; 16_000];
    impulse[0] = 1.0;
    let buffer = AudioBuffer::new(impulse, 8_000, 1);
    let out = Reverb::new(1.0).apply(&buffer);

    for tap in 1..=5usize {
        let expected = 0.9f32.powi(tap as i32);
        assert!((out.samples[tap * 1_600] - expected).abs() < 1e-5);
    }
}

#[test]
fn test_bass_boost_shelf() {
    let low = AudioBuffer::new(generate_sine(100.0, 0.1, SAMPLE_RATE, SAMPLE_RATE as usize), SAMPLE_RATE, 1);
    let high = AudioBuffer::new(generate_sine(440.0, 0.1, SAMPLE_RATE, SAMPLE_RATE as usize), SAMPLE_RATE, 1);
    let boost = BassBoost::new(1.0);

    let region = 5_000..40_000;
    let low_ratio = peak_value(&boost.apply(&low).samples[region.clone()])
        / peak_value(&low.samples[region.clone()]);
    let high_ratio = peak_value(&boost.apply(&high).samples[region.clone()])
        / peak_value(&high.samples[region]);

    assert!(low_ratio > 3.0 && low_ratio < 4.2, "100 Hz ratio {low_ratio}");
    assert!((high_ratio - 1.0).abs() < 0.1, "440 Hz ratio {high_ratio}");
}
