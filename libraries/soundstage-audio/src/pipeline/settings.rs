//! Processing configuration
//!
//! `PipelineSettings` is the single source of truth for how a buffer is
//! rendered. Setters clamp finite values into each documented range and reject
//! NaN and infinities, so a settings value is always renderable.

use crate::effects::{EqPreset, EqualizerSettings};
use crate::error::Result;
use crate::params::{
    check_volume, ParamRange, BASS_BOOST_AMOUNT, BINAURAL_BEAT_HZ, PANNER_SPEED, REVERB_AMOUNT,
    SURROUND_INTENSITY,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Enable flag plus the single parameter of an optional effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSettings {
    /// Whether the effect runs at render time
    pub enabled: bool,
    /// Effect parameter, in the effect's documented range
    pub value: f32,
}

impl EffectSettings {
    /// Disabled effect with the given parameter
    pub const fn disabled(value: f32) -> Self {
        Self {
            enabled: false,
            value,
        }
    }

    /// Parameter value when enabled
    pub fn active(&self) -> Option<f32> {
        self.enabled.then_some(self.value)
    }

    fn update(&mut self, range: &ParamRange, enabled: bool, value: f32) -> Result<()> {
        let value = range.clamp(value)?;
        self.enabled = enabled;
        self.value = value;
        debug!("{}: enabled={} value={}", range.name, enabled, value);
        Ok(())
    }
}

/// Complete processing configuration
///
/// Defaults: flat EQ, every optional effect disabled (surround 0.5, 8D 30
/// cycles/min, binaural 30 Hz, bass boost 0.5, reverb 0.3), volume 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    equalizer: EqualizerSettings,
    surround: EffectSettings,
    panner_8d: EffectSettings,
    binaural: EffectSettings,
    bass_boost: EffectSettings,
    reverb: EffectSettings,
    volume: f32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            equalizer: EqualizerSettings::flat(),
            surround: EffectSettings::disabled(0.5),
            panner_8d: EffectSettings::disabled(30.0),
            binaural: EffectSettings::disabled(30.0),
            bass_boost: EffectSettings::disabled(0.5),
            reverb: EffectSettings::disabled(0.3),
            volume: 1.0,
        }
    }
}

impl PipelineSettings {
    /// Default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Equalizer band gains
    pub fn equalizer(&self) -> &EqualizerSettings {
        &self.equalizer
    }

    /// Surround enable flag and intensity
    pub fn surround(&self) -> EffectSettings {
        self.surround
    }

    /// 8D panner enable flag and speed (cycles per minute)
    pub fn panner_8d(&self) -> EffectSettings {
        self.panner_8d
    }

    /// Binaural enable flag and beat frequency (Hz)
    pub fn binaural(&self) -> EffectSettings {
        self.binaural
    }

    /// Bass boost enable flag and amount
    pub fn bass_boost(&self) -> EffectSettings {
        self.bass_boost
    }

    /// Reverb enable flag and amount
    pub fn reverb(&self) -> EffectSettings {
        self.reverb
    }

    /// Output volume (linear)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set one equalizer band by centre frequency
    pub fn set_eq_gain(&mut self, frequency: u32, gain_db: f32) -> Result<()> {
        self.equalizer.set_gain(frequency, gain_db)
    }

    /// Set one equalizer band by index (0 = 32 Hz)
    pub fn set_eq_band_gain(&mut self, index: usize, gain_db: f32) -> Result<()> {
        self.equalizer.set_band_gain(index, gain_db)
    }

    /// Replace all equalizer bands
    pub fn set_equalizer(&mut self, equalizer: EqualizerSettings) {
        self.equalizer = equalizer;
    }

    /// Load an equalizer preset
    pub fn apply_eq_preset(&mut self, preset: EqPreset) {
        debug!("Applying EQ preset: {}", preset.name());
        self.equalizer = EqualizerSettings::from_preset(preset);
    }

    /// Configure stereo surround
    pub fn set_surround(&mut self, enabled: bool, intensity: f32) -> Result<()> {
        self.surround.update(&SURROUND_INTENSITY, enabled, intensity)
    }

    /// Configure the 8D panner
    pub fn set_8d(&mut self, enabled: bool, speed: f32) -> Result<()> {
        self.panner_8d.update(&PANNER_SPEED, enabled, speed)
    }

    /// Configure the binaural beat generator
    pub fn set_binaural(&mut self, enabled: bool, beat_hz: f32) -> Result<()> {
        self.binaural.update(&BINAURAL_BEAT_HZ, enabled, beat_hz)
    }

    /// Configure bass boost
    pub fn set_bass_boost(&mut self, enabled: bool, amount: f32) -> Result<()> {
        self.bass_boost.update(&BASS_BOOST_AMOUNT, enabled, amount)
    }

    /// Configure reverb
    pub fn set_reverb(&mut self, enabled: bool, amount: f32) -> Result<()> {
        self.reverb.update(&REVERB_AMOUNT, enabled, amount)
    }

    /// Set output volume
    ///
    /// Any finite value is accepted; the rendered output is clipped.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = check_volume(volume)?;
        Ok(())
    }

    /// Disable all five optional effects
    ///
    /// Parameters, EQ and volume are kept.
    pub fn reset_effects(&mut self) {
        for effect in [
            &mut self.surround,
            &mut self.panner_8d,
            &mut self.binaural,
            &mut self.bass_boost,
            &mut self.reverb,
        ] {
            effect.enabled = false;
        }
        debug!("All effects disabled");
    }

    /// Whether rendering would only apply volume and clipping
    pub fn is_bypass(&self) -> bool {
        self.equalizer.is_flat()
            && [
                self.surround,
                self.panner_8d,
                self.binaural,
                self.bass_boost,
                self.reverb,
            ]
            .iter()
            .all(|e| !e.enabled)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore from JSON, passing every value through its setter
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        raw.sanitized()
    }

    fn sanitized(&self) -> Result<Self> {
        let mut settings = Self {
            equalizer: self.equalizer.sanitized()?,
            ..Self::default()
        };
        settings.set_surround(self.surround.enabled, self.surround.value)?;
        settings.set_8d(self.panner_8d.enabled, self.panner_8d.value)?;
        settings.set_binaural(self.binaural.enabled, self.binaural.value)?;
        settings.set_bass_boost(self.bass_boost.enabled, self.bass_boost.value)?;
        settings.set_reverb(self.reverb.enabled, self.reverb.value)?;
        settings.set_volume(self.volume)?;
        Ok(settings)
    }
}
