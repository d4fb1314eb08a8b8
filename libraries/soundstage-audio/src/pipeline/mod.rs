//! Render pipeline
//!
//! Composes the effects in a fixed order:
//!
//! Equalizer → Surround → 8D → Binaural → Bass boost → Reverb → volume → clip
//!
//! Optional effects run only when enabled. Rendering is a pure function of the
//! input buffer and a `PipelineSettings` value; nothing is cached between
//! calls.

mod settings;

pub use crate::effects::EqPreset;
pub use settings::{EffectSettings, PipelineSettings};

use crate::effects::{BassBoost, Binaural, EffectChain, Equalizer, Panner8d, Reverb, Surround};
use soundstage_core::AudioBuffer;
use std::time::Instant;
use tracing::debug;

/// Assemble the effect chain described by `settings`, in render order
pub fn build_chain(settings: &PipelineSettings) -> EffectChain {
    let mut chain = EffectChain::new();
    chain.add_effect(Box::new(Equalizer::new(settings.equalizer().clone())));

    if let Some(intensity) = settings.surround().active() {
        chain.add_effect(Box::new(Surround::new(intensity)));
    }
    if let Some(speed) = settings.panner_8d().active() {
        chain.add_effect(Box::new(Panner8d::new(speed)));
    }
    if let Some(beat_hz) = settings.binaural().active() {
        chain.add_effect(Box::new(Binaural::new(beat_hz)));
    }
    if let Some(amount) = settings.bass_boost().active() {
        chain.add_effect(Box::new(BassBoost::new(amount)));
    }
    if let Some(amount) = settings.reverb().active() {
        chain.add_effect(Box::new(Reverb::new(amount)));
    }

    chain
}

/// Render `buffer` with `settings`
///
/// The output has the same frame and channel count as the input (binaural
/// expands mono to stereo) and every sample lies in [-1.0, 1.0].
pub fn render(buffer: &AudioBuffer, settings: &PipelineSettings) -> AudioBuffer {
    let start = Instant::now();
    let chain = build_chain(settings);

    let mut output = chain.apply(buffer);
    let volume = settings.volume();
    for sample in &mut output.samples {
        *sample = (*sample * volume).clamp(-1.0, 1.0);
    }

    debug!(
        "Rendered {} frames through {:?} in {:?}",
        output.frames(),
        chain,
        start.elapsed()
    );
    output
}

/// Owner of the processing configuration
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    settings: PipelineSettings,
}

impl Pipeline {
    /// Pipeline with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with the given settings
    pub fn with_settings(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// Current settings
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Mutable access for parameter changes
    pub fn settings_mut(&mut self) -> &mut PipelineSettings {
        &mut self.settings
    }

    /// Copy of the current settings for a render started elsewhere
    pub fn snapshot(&self) -> PipelineSettings {
        self.settings.clone()
    }

    /// Load an equalizer preset
    pub fn apply_eq_preset(&mut self, preset: EqPreset) {
        self.settings.apply_eq_preset(preset);
    }

    /// Disable all optional effects
    pub fn reset_effects(&mut self) {
        self.settings.reset_effects();
    }

    /// Render `buffer` with the current settings
    pub fn render(&self, buffer: &AudioBuffer) -> AudioBuffer {
        render(buffer, &self.settings)
    }
}
