//! Error taxonomy for stretching and audio I/O.

use std::fmt;

/// Failure conditions surfaced by the stretcher and the WAV codec.
///
/// Everything is detected up front: parameters are validated before any
/// processing buffer is allocated, and the input length is checked before
/// the frame loop starts. Inside the loop no error paths exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StretchError {
    /// Stretch ratio that is zero, negative, non-finite, or so small it
    /// rounds to a zero synthesis hop.
    InvalidRatio(String),
    /// Framing or rate parameter outside its valid range, such as a zero
    /// window size or analysis hop.
    InvalidParameter(String),
    /// Malformed or unsupported audio file contents.
    InvalidFormat(String),
    /// Signal with fewer samples than one analysis window.
    InputTooShort { provided: usize, minimum: usize },
    /// Underlying file system failure.
    IoError(String),
}

impl fmt::Display for StretchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StretchError::InvalidRatio(msg) => write!(f, "invalid stretch ratio: {msg}"),
            StretchError::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            StretchError::InvalidFormat(msg) => write!(f, "unsupported audio data: {msg}"),
            StretchError::InputTooShort { provided, minimum } => write!(
                f,
                "input of {provided} samples is shorter than the {minimum}-sample analysis window"
            ),
            StretchError::IoError(msg) => write!(f, "I/O failure: {msg}"),
        }
    }
}

impl std::error::Error for StretchError {}

impl From<std::io::Error> for StretchError {
    fn from(err: std::io::Error) -> Self {
        StretchError::IoError(err.to_string())
    }
}
