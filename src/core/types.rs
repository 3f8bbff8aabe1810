//! Audio buffer and stretch parameter types.

use crate::error::StretchError;

/// A single audio sample (32-bit float, range -1.0 to 1.0).
pub type Sample = f32;

/// Channel layout of an audio buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Mono,
    Stereo,
}

impl Channels {
    /// Number of channels in this layout.
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

/// Buffer holding audio samples in interleaved format.
///
/// For mono audio, samples are stored sequentially: `[s0, s1, s2, ...]`
/// For stereo audio, samples are interleaved: `[L0, R0, L1, R1, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Raw interleaved sample data.
    pub data: Vec<Sample>,
    /// Sample rate in Hz. Opaque to the stretcher, used for duration reporting.
    pub sample_rate: u32,
    /// Channel layout.
    pub channels: Channels,
}

impl AudioBuffer {
    /// Creates a new audio buffer.
    pub fn new(data: Vec<Sample>, sample_rate: u32, channels: Channels) -> Self {
        Self {
            data,
            sample_rate,
            channels,
        }
    }

    /// Creates a mono buffer.
    pub fn from_mono(data: Vec<Sample>, sample_rate: u32) -> Self {
        Self::new(data, sample_rate, Channels::Mono)
    }

    /// Creates a stereo buffer from interleaved data.
    pub fn from_stereo(data: Vec<Sample>, sample_rate: u32) -> Self {
        Self::new(data, sample_rate, Channels::Stereo)
    }

    /// Number of frames in the buffer (total samples / channels).
    pub fn num_frames(&self) -> usize {
        self.data.len() / self.channels.count()
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Returns true if the buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mixes down to mono by averaging channels.
    ///
    /// A mono buffer is returned unchanged (cloned data).
    pub fn to_mono(&self) -> Vec<Sample> {
        match self.channels {
            Channels::Mono => self.data.clone(),
            Channels::Stereo => self
                .data
                .chunks_exact(2)
                .map(|frame| (frame[0] + frame[1]) * 0.5)
                .collect(),
        }
    }

    /// Scales samples so the peak absolute value is 1.0.
    ///
    /// An all-zero buffer is left untouched; dividing by a zero peak would
    /// propagate NaN through the whole signal.
    pub fn peak_normalize(&mut self) {
        let peak = self.data.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        if peak > 0.0 {
            let inv = 1.0 / peak;
            for sample in &mut self.data {
                *sample *= inv;
            }
        }
    }
}

/// Default analysis window length in samples.
pub const DEFAULT_WIN_SIZE: usize = 1024;
/// Default analysis hop in samples.
pub const DEFAULT_AN_HOP: usize = 256;

/// Parameters controlling the time stretch operation.
#[derive(Debug, Clone)]
pub struct StretchParams {
    /// Stretch ratio: >1.0 = longer, <1.0 = shorter.
    pub ratio: f64,
    /// Analysis window length in samples (default: 1024).
    pub win_size: usize,
    /// Analysis hop in samples (default: 256).
    pub an_hop: usize,
    /// Sample rate in Hz (default: 44100). Used only for reporting.
    pub sample_rate: u32,
}

impl StretchParams {
    /// Creates parameters with the given stretch ratio and default framing.
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            win_size: DEFAULT_WIN_SIZE,
            an_hop: DEFAULT_AN_HOP,
            sample_rate: 44100,
        }
    }

    /// Sets the analysis window length.
    pub fn with_win_size(mut self, win_size: usize) -> Self {
        self.win_size = win_size;
        self
    }

    /// Sets the analysis hop.
    pub fn with_an_hop(mut self, an_hop: usize) -> Self {
        self.an_hop = an_hop;
        self
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Synthesis hop: analysis hop scaled by the ratio, rounded to the
    /// nearest sample. The rounding is why the actual stretch reported on
    /// output differs slightly from the requested ratio.
    pub fn syn_hop(&self) -> usize {
        (self.ratio * self.an_hop as f64).round() as usize
    }

    /// Validates all parameters before any buffer is allocated.
    pub fn validate(&self) -> Result<(), StretchError> {
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(StretchError::InvalidRatio(format!(
                "{} (must be positive and finite)",
                self.ratio
            )));
        }
        if self.win_size == 0 {
            return Err(StretchError::InvalidParameter(
                "window size must be positive".to_string(),
            ));
        }
        if self.an_hop == 0 {
            return Err(StretchError::InvalidParameter(
                "analysis hop must be positive".to_string(),
            ));
        }
        if self.syn_hop() == 0 {
            return Err(StretchError::InvalidRatio(format!(
                "{} rounds to a zero synthesis hop at analysis hop {}",
                self.ratio, self.an_hop
            )));
        }
        if self.sample_rate == 0 {
            return Err(StretchError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
