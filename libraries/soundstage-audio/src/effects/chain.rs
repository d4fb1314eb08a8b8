/// Effect chain for rendering audio
///
/// This module provides a trait-based architecture for chaining effects.
/// Effects are applied in order; each takes a buffer by reference and returns
/// a new one, so no stage can observe another stage's in-place mutation.
use soundstage_core::AudioBuffer;

/// Trait for whole-buffer effects that can be chained together
///
/// Implementations are pure: the output depends only on the input buffer and
/// the effect's parameters, and nothing is carried over between calls.
pub trait Effect: Send + Sync {
    /// Process a complete buffer into a new buffer
    ///
    /// The sample rate is taken from the buffer itself.
    fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer;

    /// Get effect name (for logging)
    fn name(&self) -> &'static str;
}

/// Chain of effects applied in insertion order
#[derive(Default)]
pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectChain {
    /// Create a new empty effect chain
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Add an effect to the end of the chain
    pub fn add_effect(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    /// Run the buffer through every effect in order
    ///
    /// An empty chain returns a copy of the input.
    pub fn apply(&self, buffer: &AudioBuffer) -> AudioBuffer {
        let mut current = buffer.clone();
        for effect in &self.effects {
            tracing::trace!("Applying {}", effect.name());
            current = effect.apply(&current);
        }
        current
    }

    /// Get number of effects in chain
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Check if chain is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names in processing order
    pub fn names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }
}

impl std::fmt::Debug for EffectChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectChain")
            .field("effects", &self.names())
            .finish()
    }
}
