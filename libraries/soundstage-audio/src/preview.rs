//! Waveform preview for visualization
//!
//! Not part of the effect chain. Produces a short mono outline of a buffer.

use soundstage_core::AudioBuffer;

/// Number of points in a preview
pub const PREVIEW_POINTS: usize = 1000;

/// Downsampled mono outline of `buffer`
///
/// Channels are averaged per frame, then every N-th frame is kept with
/// `N = max(1, frames / 1000)`. The result holds at most 1000 points; buffers
/// shorter than that yield one point per frame.
pub fn preview(buffer: &AudioBuffer) -> Vec<f32> {
    let channels = buffer.channels as usize;
    let frames = buffer.frames();
    if frames == 0 {
        return Vec::new();
    }

    let step = (frames / PREVIEW_POINTS).max(1);
    buffer
        .samples
        .chunks_exact(channels)
        .step_by(step)
        .take(PREVIEW_POINTS)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Preview of the loaded buffer, or a flat line when nothing is loaded
pub fn preview_or_silence(buffer: Option<&AudioBuffer>) -> Vec<f32> {
    match buffer {
        Some(buffer) => preview(buffer),
        None => vec![0.0; PREVIEW_POINTS],
    }
}
