//! Window function for spectral analysis.
//!
//! The phase vocoder uses a symmetric Hann (raised-cosine) window on both
//! the analysis and synthesis sides.

use std::f64::consts::PI;

/// Generates a symmetric Hann window: zero at both endpoints, peak of 1.0
/// at the center.
pub fn hann_window(size: usize) -> Vec<f32> {
    match size {
        0 => return vec![],
        1 => return vec![1.0],
        _ => {}
    }
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = (2.0 * PI * i as f64) / (n - 1.0);
            (0.5 * (1.0 - x.cos())) as f32
        })
        .collect()
}

/// Normalization divisor keeping overlap-added energy roughly constant:
/// `sqrt((win_size / hop) / 2)` for the given side's hop.
#[inline]
pub fn overlap_norm(win_size: usize, hop: usize) -> f32 {
    ((win_size as f32 / hop as f32) / 2.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window_properties() {
        let w = hann_window(1024);
        assert_eq!(w.len(), 1024);
        // First and last should be near zero
        assert!(w[0].abs() < 1e-6);
        assert!(w[1023].abs() < 1e-6);
        // Middle should be near 1.0
        assert!((w[512] - 1.0).abs() < 0.01);
        // Symmetric
        for i in 0..512 {
            assert!((w[i] - w[1023 - i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_windows() {
        assert!(hann_window(0).is_empty());
        assert_eq!(hann_window(1), vec![1.0]);
    }

    #[test]
    fn test_overlap_norm() {
        // win 1024, hop 256: sqrt((1024/256)/2) = sqrt(2)
        assert!((overlap_norm(1024, 256) - 2.0f32.sqrt()).abs() < 1e-6);
        // win 1024, hop 512: sqrt(1) = 1
        assert!((overlap_norm(1024, 512) - 1.0).abs() < 1e-6);
    }
}
