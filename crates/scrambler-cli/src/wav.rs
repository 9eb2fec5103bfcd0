//! Interleaved WAV I/O on top of hound.
//!
//! Audio stays interleaved end to end: the engine renders interleaved
//! blocks directly, so nothing here splits channels.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;
use thiserror::Error;

/// Errors from WAV I/O.
#[derive(Debug, Error)]
pub enum WavError {
    /// Decoder or encoder failure
    #[error(transparent)]
    Hound(#[from] hound::Error),

    /// The reverb only renders mono and stereo
    #[error("unsupported channel count {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),

    /// Output depth other than 16, 24 or 32
    #[error("unsupported bit depth {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Output sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 16-bit PCM
    Int16,
    /// 24-bit PCM
    Int24,
    /// 32-bit IEEE float
    Float32,
}

impl BitDepth {
    fn bits(self) -> u16 {
        match self {
            Self::Int16 => 16,
            Self::Int24 => 24,
            Self::Float32 => 32,
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = WavError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(Self::Int16),
            24 => Ok(Self::Int24),
            32 => Ok(Self::Float32),
            other => Err(WavError::UnsupportedBitDepth(other)),
        }
    }
}

/// Decoded audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    /// Interleaved samples in `[-1, 1]`.
    pub samples: Vec<f32>,
    /// 1 or 2.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
}

impl Audio {
    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }
}

/// Decode a mono or stereo file of any PCM or float format hound reads.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Audio, WavError> {
    let reader = WavReader::open(path)?;
    let format = reader.spec();
    if !matches!(format.channels, 1 | 2) {
        return Err(WavError::UnsupportedChannels(format.channels));
    }

    let samples = if format.sample_format == SampleFormat::Float {
        reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?
    } else {
        let full_scale = (1u32 << (format.bits_per_sample - 1)) as f32;
        reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| v as f32 / full_scale))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Audio {
        samples,
        channels: format.channels,
        sample_rate: format.sample_rate,
    })
}

/// Encode `audio` at `depth`. Integer depths clip to full scale.
pub fn write_wav(path: impl AsRef<Path>, audio: &Audio, depth: BitDepth) -> Result<(), WavError> {
    if !matches!(audio.channels, 1 | 2) {
        return Err(WavError::UnsupportedChannels(audio.channels));
    }

    let format = hound::WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: depth.bits(),
        sample_format: if depth == BitDepth::Float32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, format)?;

    if depth == BitDepth::Float32 {
        for &s in &audio.samples {
            writer.write_sample(s)?;
        }
    } else {
        let full_scale = (1i32 << (depth.bits() - 1)) as f32;
        for &s in &audio.samples {
            writer.write_sample((s * full_scale).clamp(-full_scale, full_scale - 1.0) as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
