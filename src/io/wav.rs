//! Hand-rolled RIFF/WAV reader and writer.
//!
//! Reads 16-bit PCM, 24-bit PCM, and 32-bit float; writes 16-bit PCM or
//! 32-bit float. Only the chunks the stretcher needs (`fmt ` and `data`)
//! are interpreted; other chunks are skipped.

use crate::core::types::{AudioBuffer, Channels, Sample};
use crate::error::StretchError;
use std::io::{Read, Write};

/// WAV audio format codes.
const WAV_FORMAT_PCM: u16 = 1;
const WAV_FORMAT_IEEE_FLOAT: u16 = 3;

/// Sample encodings supported on the write side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// 16-bit signed PCM.
    Pcm16,
    /// 32-bit IEEE float.
    Float32,
}

impl WavFormat {
    fn format_code(&self) -> u16 {
        match self {
            WavFormat::Pcm16 => WAV_FORMAT_PCM,
            WavFormat::Float32 => WAV_FORMAT_IEEE_FLOAT,
        }
    }

    fn bytes_per_sample(&self) -> usize {
        match self {
            WavFormat::Pcm16 => 2,
            WavFormat::Float32 => 4,
        }
    }
}

/// Decodes a WAV file from a byte slice.
pub fn read_wav(data: &[u8]) -> Result<AudioBuffer, StretchError> {
    if data.len() < 44 {
        return Err(StretchError::InvalidFormat(
            "WAV file too short".to_string(),
        ));
    }
    if &data[0..4] != b"RIFF" {
        return Err(StretchError::InvalidFormat(
            "missing RIFF header".to_string(),
        ));
    }
    if &data[8..12] != b"WAVE" {
        return Err(StretchError::InvalidFormat(
            "missing WAVE identifier".to_string(),
        ));
    }

    let mut format_code: u16 = 0;
    let mut num_channels: u16 = 0;
    let mut sample_rate: u32 = 0;
    let mut bits_per_sample: u16 = 0;
    let mut audio_data: &[u8] = &[];

    let mut cursor = 12;
    while cursor + 8 <= data.len() {
        let chunk_id = &data[cursor..cursor + 4];
        let chunk_size = read_u32_le(data, cursor + 4) as usize;
        cursor += 8;

        if chunk_id == b"fmt " {
            if cursor + 16 > data.len() {
                return Err(StretchError::InvalidFormat(
                    "fmt chunk too short".to_string(),
                ));
            }
            format_code = read_u16_le(data, cursor);
            num_channels = read_u16_le(data, cursor + 2);
            sample_rate = read_u32_le(data, cursor + 4);
            // skip byte rate (4 bytes) and block align (2 bytes)
            bits_per_sample = read_u16_le(data, cursor + 14);
        } else if chunk_id == b"data" {
            audio_data = if cursor + chunk_size > data.len() {
                // Truncated file: use whatever data is present
                &data[cursor..]
            } else {
                &data[cursor..cursor + chunk_size]
            };
        }

        cursor += chunk_size;
        // WAV chunks are word-aligned
        if chunk_size % 2 != 0 {
            cursor += 1;
        }
    }

    if sample_rate == 0 {
        return Err(StretchError::InvalidFormat(
            "no fmt chunk found".to_string(),
        ));
    }

    let channels = match num_channels {
        1 => Channels::Mono,
        2 => Channels::Stereo,
        n => {
            return Err(StretchError::InvalidFormat(format!(
                "unsupported channel count: {}",
                n
            )))
        }
    };

    let samples = decode_samples(audio_data, format_code, bits_per_sample)?;
    Ok(AudioBuffer::new(samples, sample_rate, channels))
}

fn decode_samples(
    audio_data: &[u8],
    format_code: u16,
    bits_per_sample: u16,
) -> Result<Vec<Sample>, StretchError> {
    match (format_code, bits_per_sample) {
        (WAV_FORMAT_PCM, 16) => Ok(audio_data
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32768.0)
            .collect()),
        (WAV_FORMAT_PCM, 24) => Ok(audio_data
            .chunks_exact(3)
            .map(|b| {
                // Sign-extend via the top of an i32
                let raw = i32::from_le_bytes([0, b[0], b[1], b[2]]) >> 8;
                raw as f32 / 8388608.0
            })
            .collect()),
        (WAV_FORMAT_IEEE_FLOAT, 32) => Ok(audio_data
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()),
        (fmt, bits) => Err(StretchError::InvalidFormat(format!(
            "unsupported WAV format: code={}, bits={}",
            fmt, bits
        ))),
    }
}

/// Reads a WAV file from disk.
pub fn read_wav_file(path: &str) -> Result<AudioBuffer, StretchError> {
    let mut file =
        std::fs::File::open(path).map_err(|e| StretchError::IoError(format!("{}: {}", path, e)))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| StretchError::IoError(format!("{}: {}", path, e)))?;
    read_wav(&data)
}

/// Encodes an audio buffer as WAV bytes in the given sample format.
pub fn write_wav(buffer: &AudioBuffer, format: WavFormat) -> Vec<u8> {
    let num_channels = buffer.channels.count() as u16;
    let bytes_per_sample = format.bytes_per_sample();
    let bits_per_sample = (bytes_per_sample * 8) as u16;
    let byte_rate = buffer.sample_rate * num_channels as u32 * bytes_per_sample as u32;
    let block_align = num_channels * bytes_per_sample as u16;
    let data_size = (buffer.data.len() * bytes_per_sample) as u32;
    let file_size = 36 + data_size;

    let mut out = Vec::with_capacity(file_size as usize + 8);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&format.format_code().to_le_bytes());
    out.extend_from_slice(&num_channels.to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());

    match format {
        WavFormat::Pcm16 => {
            for &sample in &buffer.data {
                let raw = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
                out.extend_from_slice(&raw.to_le_bytes());
            }
        }
        WavFormat::Float32 => {
            for &sample in &buffer.data {
                out.extend_from_slice(&sample.to_le_bytes());
            }
        }
    }

    out
}

/// Writes a WAV file to disk in the given sample format.
pub fn write_wav_file(
    path: &str,
    buffer: &AudioBuffer,
    format: WavFormat,
) -> Result<(), StretchError> {
    let data = write_wav(buffer, format);
    let mut file = std::fs::File::create(path)
        .map_err(|e| StretchError::IoError(format!("{}: {}", path, e)))?;
    file.write_all(&data)
        .map_err(|e| StretchError::IoError(format!("{}: {}", path, e)))?;
    Ok(())
}

#[inline]
fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_roundtrip_16bit() {
        let original = AudioBuffer::from_mono(vec![0.0, 0.5, -0.5, 0.99, -1.0], 44100);
        let wav_data = write_wav(&original, WavFormat::Pcm16);
        let decoded = read_wav(&wav_data).unwrap();
        assert_eq!(decoded.sample_rate, 44100);
        assert_eq!(decoded.channels, Channels::Mono);
        assert_eq!(decoded.data.len(), 5);
        // 16-bit has quantization error
        for i in 0..5 {
            assert!(
                (decoded.data[i] - original.data[i]).abs() < 0.001,
                "sample {}: {} vs {}",
                i,
                decoded.data[i],
                original.data[i]
            );
        }
    }

    #[test]
    fn test_wav_roundtrip_float() {
        let original = AudioBuffer::from_stereo(vec![0.1, -0.2, 0.3, -0.4, 0.5, -0.6], 48000);
        let wav_data = write_wav(&original, WavFormat::Float32);
        let decoded = read_wav(&wav_data).unwrap();
        assert_eq!(decoded.sample_rate, 48000);
        assert_eq!(decoded.channels, Channels::Stereo);
        assert_eq!(decoded.data, original.data);
    }

    #[test]
    fn test_wav_24bit_decode() {
        // Hand-build a minimal 24-bit mono file with one full-scale
        // positive and one full-scale negative sample.
        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36u32 + 6).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&44100u32.to_le_bytes());
        wav.extend_from_slice(&(44100u32 * 3).to_le_bytes());
        wav.extend_from_slice(&3u16.to_le_bytes());
        wav.extend_from_slice(&24u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&6u32.to_le_bytes());
        wav.extend_from_slice(&[0xFF, 0xFF, 0x7F]); // +8388607
        wav.extend_from_slice(&[0x00, 0x00, 0x80]); // -8388608

        let decoded = read_wav(&wav).unwrap();
        assert_eq!(decoded.data.len(), 2);
        assert!((decoded.data[0] - 1.0).abs() < 1e-5);
        assert!((decoded.data[1] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_wav_invalid_data() {
        assert!(read_wav(&[]).is_err());
        assert!(read_wav(b"NOT_RIFF_HEADER_AT_ALL______________________").is_err());
    }

    #[test]
    fn test_wav_pcm16_clamps_out_of_range() {
        let buffer = AudioBuffer::from_mono(vec![2.0, -2.0], 44100);
        let wav = write_wav(&buffer, WavFormat::Pcm16);
        let decoded = read_wav(&wav).unwrap();
        assert!((decoded.data[0] - 1.0).abs() < 0.001);
        assert!((decoded.data[1] + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_wav_stereo_16bit() {
        let original = AudioBuffer::from_stereo(vec![0.25, -0.25, 0.5, -0.5], 44100);
        let wav = write_wav(&original, WavFormat::Pcm16);
        let decoded = read_wav(&wav).unwrap();
        assert_eq!(decoded.channels, Channels::Stereo);
        assert_eq!(decoded.num_frames(), 2);
    }
}
