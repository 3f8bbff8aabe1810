//! Analysis framing and overlap-add fusion.
//!
//! `create_frames` slices a signal into overlapping fixed-length windows at
//! a fixed hop; `overlap_add` is its synthesis-side counterpart, summing a
//! sequence of frames back into a signal at a (possibly different) hop.

use crate::core::types::Sample;

/// Matrix of successive windows, stored as one contiguous row-major buffer
/// of `num_frames * win_size` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMatrix {
    data: Vec<Sample>,
    win_size: usize,
    num_frames: usize,
}

impl FrameMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeroed(num_frames: usize, win_size: usize) -> Self {
        Self {
            data: vec![0.0; num_frames * win_size],
            win_size,
            num_frames,
        }
    }

    /// Number of frames (rows).
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Frame length (columns).
    #[inline]
    pub fn win_size(&self) -> usize {
        self.win_size
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[Sample] {
        &self.data[i * self.win_size..(i + 1) * self.win_size]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Sample] {
        &mut self.data[i * self.win_size..(i + 1) * self.win_size]
    }
}

/// Slices `signal` into overlapping windows of `win_size` samples spaced
/// `hop` samples apart.
///
/// The number of frames is `(len - win_size) / hop + 1`; any trailing
/// remainder of the signal that does not fill a whole window is discarded.
/// Callers guarantee `hop > 0` and `signal.len() >= win_size`.
pub fn create_frames(signal: &[Sample], hop: usize, win_size: usize) -> FrameMatrix {
    debug_assert!(hop > 0);
    debug_assert!(signal.len() >= win_size);

    let num_frames = (signal.len() - win_size) / hop + 1;
    let mut frames = FrameMatrix::zeroed(num_frames, win_size);
    for i in 0..num_frames {
        let start = i * hop;
        frames
            .row_mut(i)
            .copy_from_slice(&signal[start..start + win_size]);
    }
    frames
}

/// Overlap-adds frames back into a signal at the given hop.
///
/// Output length is `(num_frames - 1) * hop + win_size`. Overlapping regions
/// from consecutive frames sum, which is what the window normalization in
/// the vocoder compensates for.
pub fn overlap_add(frames: &FrameMatrix, hop: usize) -> Vec<Sample> {
    debug_assert!(hop > 0);

    if frames.num_frames() == 0 {
        return Vec::new();
    }
    let out_len = (frames.num_frames() - 1) * hop + frames.win_size();
    let mut output = vec![0.0; out_len];
    for i in 0..frames.num_frames() {
        let start = i * hop;
        for (out, &sample) in output[start..start + frames.win_size()]
            .iter_mut()
            .zip(frames.row(i).iter())
        {
            *out += sample;
        }
    }
    output
}
