//! Basic time stretching example.
//!
//! Generates a sine wave and stretches it by 1.5x.
//!
//! Run with: cargo run --example basic_stretch

use std::f32::consts::PI;

use phasestretch::StretchParams;

fn main() {
    let sample_rate = 44100u32;
    let freq = 440.0f32;

    // 1 second of 440 Hz sine
    let input: Vec<f32> = (0..sample_rate as usize)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
        .collect();

    println!("Input: {} samples (1.00s)", input.len());

    let params = StretchParams::new(1.5).with_sample_rate(sample_rate);
    let output = phasestretch::stretch(&input, &params).expect("stretch failed");

    println!(
        "Output: {} samples ({:.2}s)",
        output.len(),
        output.len() as f64 / sample_rate as f64
    );
    println!(
        "Actual ratio: {:.3}",
        output.len() as f64 / input.len() as f64
    );
}
