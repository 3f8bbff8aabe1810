#![forbid(unsafe_code)]
//! Pure Rust phase vocoder time stretching.
//!
//! `phasestretch` changes the duration of a mono audio signal without
//! altering its pitch. The signal is analyzed in short overlapping windows,
//! each bin's true instantaneous frequency is estimated from the phase
//! difference between consecutive frames, and the frames are resynthesized
//! with a phase trajectory consistent with the new frame spacing before
//! being overlap-added at the synthesis hop.
//!
//! The whole signal is processed in memory; there is no streaming mode, and
//! multi-channel audio is mixed down to mono before stretching.
//!
//! # Quick start
//!
//! ```
//! use phasestretch::StretchParams;
//!
//! // 1 second of 440 Hz sine at 44.1 kHz
//! let input: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//!
//! let params = StretchParams::new(1.5);
//! let output = phasestretch::stretch(&input, &params).unwrap();
//! assert!(output.len() > input.len()); // ~1.5x longer
//! ```

pub mod core;
pub mod error;
pub mod io;
pub mod stretch;

pub use crate::core::frame::{create_frames, overlap_add, FrameMatrix};
pub use crate::core::types::{AudioBuffer, Channels, Sample, StretchParams};
pub use crate::error::StretchError;
pub use crate::stretch::PhaseVocoder;

/// Stretches a mono signal by the ratio in `params`.
///
/// Convenience wrapper constructing a [`PhaseVocoder`] for one shot. The
/// output length tracks `input.len() * ratio` up to the vocoder's priming
/// padding and frame-count truncation.
///
/// # Errors
/// Returns an error for invalid parameters or an input shorter than the
/// analysis window.
pub fn stretch(input: &[f32], params: &StretchParams) -> Result<Vec<f32>, StretchError> {
    let mut vocoder = PhaseVocoder::new(params)?;
    vocoder.process(input)
}

/// Stretches an [`AudioBuffer`], mixing multi-channel audio down to mono
/// first. The result is a mono buffer at the input's sample rate.
///
/// Mono input is stretched in place without an intermediate copy of the
/// signal.
pub fn stretch_buffer(
    buffer: &AudioBuffer,
    params: &StretchParams,
) -> Result<AudioBuffer, StretchError> {
    let stretched = match buffer.channels {
        Channels::Mono => stretch(&buffer.data, params)?,
        Channels::Stereo => stretch(&buffer.to_mono(), params)?,
    };
    Ok(AudioBuffer::from_mono(stretched, buffer.sample_rate))
}
