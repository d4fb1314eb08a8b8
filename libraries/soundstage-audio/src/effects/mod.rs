//! Audio effects processing
//!
//! This module provides a trait-based effect chain for offline, whole-buffer
//! processing. All effects operate on f32 samples and return a new buffer.
//!
//! Available effects:
//! - **Equalizer**: 10-band STFT equalizer with overlap-add reconstruction
//! - **Surround**: Cross-fed high band stereo widening
//! - **Panner8d**: Slow constant-power rotation across the stereo field
//! - **Binaural**: Left/right tone pair producing a binaural beat
//! - **BassBoost**: Zero-phase low-shelf emulation below 150 Hz
//! - **Reverb**: Five-tap feed-forward echo

mod bass_boost;
mod binaural;
mod chain;
mod equalizer;
mod filters;
mod panner;
mod reverb;
mod surround;

pub use bass_boost::{BassBoost, BASS_BOOST_CUTOFF_HZ, BASS_BOOST_MAX_DB};
pub use binaural::{Binaural, BINAURAL_BASE_HZ, BINAURAL_DRY_LEVEL, BINAURAL_TONE_LEVEL};
pub use chain::{Effect, EffectChain};
pub use equalizer::{
    bin_gains, EqPreset, Equalizer, EqualizerSettings, EQ_BAND_COUNT, EQ_BAND_FREQUENCIES,
    FRAME_SIZE, HOP_SIZE,
};
pub use filters::{Butterworth, FilterKind};
pub use panner::{pan_gains, pan_position, Panner8d};
pub use reverb::{Reverb, REVERB_TAPS};
pub use surround::{Surround, SURROUND_CUTOFF};
