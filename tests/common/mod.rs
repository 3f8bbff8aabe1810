//! Shared helpers for integration tests.

use std::f32::consts::PI;

/// Generates a mono sine wave.
pub fn sine_wave(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect()
}

/// RMS of a signal.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    (signal.iter().map(|x| x * x).sum::<f32>() / signal.len() as f32).sqrt()
}

/// Spectral energy at a target frequency via a single DFT projection.
pub fn spectral_energy_at_freq(signal: &[f32], sample_rate: u32, target_freq: f32) -> f32 {
    let n = signal.len();
    if n == 0 {
        return 0.0;
    }
    let two_pi = 2.0 * PI;
    let mut real = 0.0f64;
    let mut imag = 0.0f64;
    for (i, &s) in signal.iter().enumerate() {
        let angle = two_pi * target_freq * i as f32 / sample_rate as f32;
        real += s as f64 * angle.cos() as f64;
        imag += s as f64 * angle.sin() as f64;
    }
    ((real * real + imag * imag) / n as f64).sqrt() as f32
}

/// Dominant frequency estimate from the zero-crossing rate.
pub fn dominant_freq_zcr(signal: &[f32], sample_rate: u32) -> f32 {
    if signal.len() < 4 {
        return 0.0;
    }
    let mut crossings = 0usize;
    for i in 1..signal.len() {
        if (signal[i] >= 0.0) != (signal[i - 1] >= 0.0) {
            crossings += 1;
        }
    }
    let duration = (signal.len() - 1) as f32 / sample_rate as f32;
    crossings as f32 / (2.0 * duration)
}

/// Interior slice of a stretched signal, away from the priming silence at
/// the head and the window fade at the tail.
pub fn interior(signal: &[f32], margin: usize) -> &[f32] {
    assert!(signal.len() > 2 * margin, "signal too short for margin");
    &signal[margin..signal.len() - margin]
}
