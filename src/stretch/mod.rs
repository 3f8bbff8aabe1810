//! Time stretching algorithm.

pub mod phase_vocoder;

pub use phase_vocoder::PhaseVocoder;
