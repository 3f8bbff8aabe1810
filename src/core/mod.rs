//! Core types, framing, window, and FFT utilities.

pub mod fft;
pub mod frame;
pub mod types;
pub mod window;

pub use frame::{create_frames, overlap_add, FrameMatrix};
pub use types::*;
pub use window::{hann_window, overlap_norm};
