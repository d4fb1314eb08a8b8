//! Core types for Soundstage

mod audio;

pub use audio::AudioBuffer;
