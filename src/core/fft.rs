//! Cached FFT plans shared by the phase vocoder.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Zero-valued complex number, used for FFT buffer initialization.
pub const COMPLEX_ZERO: Complex<f32> = Complex::new(0.0, 0.0);

/// A matched forward/inverse FFT pair of a fixed size.
///
/// rustfft transforms are unnormalized; [`FftPair::inverse`] folds the
/// `1/len` scaling in so that forward followed by inverse is the identity.
pub struct FftPair {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    len: usize,
}

impl FftPair {
    /// Plans both transforms for the given size.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
            len,
        }
    }

    /// Forward transform in-place.
    pub fn forward(&self, buffer: &mut [Complex<f32>]) {
        self.forward.process(buffer);
    }

    /// Inverse transform in-place, scaled by `1/len`.
    pub fn inverse(&self, buffer: &mut [Complex<f32>]) {
        self.inverse.process(buffer);
        let scale = 1.0 / self.len as f32;
        for x in buffer.iter_mut() {
            *x *= scale;
        }
    }
}
