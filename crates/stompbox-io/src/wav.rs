//! WAV file reading and writing.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::{ChunkWriter, Error, Result, Signal};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
    /// Integer or float samples.
    pub format: WavFormat,
}

impl WavSpec {
    /// 32-bit float spec.
    pub fn float(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 32,
            format: WavFormat::IeeeFloat,
        }
    }

    /// Integer PCM spec at the given depth.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
            format: WavFormat::Pcm,
        }
    }

    /// Check that the spec describes something we can read and write.
    pub fn check(&self) -> Result<()> {
        if self.channels == 0 || self.sample_rate == 0 {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels at {} Hz",
                self.channels, self.sample_rate
            )));
        }
        // The header stores bytes per second as a u32.
        let block_align = u32::from(self.channels) * u32::from(self.bits_per_sample.div_ceil(8));
        if self.sample_rate.checked_mul(block_align).is_none() {
            return Err(Error::UnsupportedFormat(format!(
                "byte rate of {} channels at {} Hz overflows the header",
                self.channels, self.sample_rate
            )));
        }
        match (self.format, self.bits_per_sample) {
            (WavFormat::IeeeFloat, 32) | (WavFormat::Pcm, 8..=32) => Ok(()),
            (format, bits) => Err(Error::UnsupportedFormat(format!(
                "{bits}-bit {}",
                match format {
                    WavFormat::Pcm => "PCM",
                    WavFormat::IeeeFloat => "float",
                }
            ))),
        }
    }

    /// Full-scale value for integer formats.
    pub(crate) fn int_scale(&self) -> f32 {
        (1i64 << (self.bits_per_sample.saturating_sub(1))) as f32
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::float(1, 48000)
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            format: match spec.sample_format {
                SampleFormat::Float => WavFormat::IeeeFloat,
                SampleFormat::Int => WavFormat::Pcm,
            },
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: match spec.format {
                WavFormat::IeeeFloat => SampleFormat::Float,
                WavFormat::Pcm => SampleFormat::Int,
            },
        }
    }
}

/// Read a WAV file as an interleaved `f32` signal.
///
/// Integer samples are scaled to `[-1, 1)`. The returned spec describes the
/// file as stored, so output can mirror it.
pub fn read_signal<P: AsRef<Path>>(path: P) -> Result<(Signal, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    spec.check()?;

    let samples: Vec<f32> = match spec.format {
        WavFormat::IeeeFloat => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        WavFormat::Pcm => {
            let max_val = spec.int_scale();
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let signal = Signal::new(spec.sample_rate, spec.channels, samples)?;
    Ok((signal, spec))
}

/// Write a whole signal in one go.
///
/// The spec's channel count and sample rate are taken from the signal; only
/// the sample format and depth are used from `spec`.
pub fn write_signal<P: AsRef<Path>>(path: P, signal: &Signal, spec: WavSpec) -> Result<()> {
    let spec = WavSpec {
        channels: signal.channels(),
        sample_rate: signal.sample_rate(),
        ..spec
    };
    let mut writer = ChunkWriter::create(path, spec)?;
    writer.write_chunk(signal.samples())?;
    writer.finalize()?;
    Ok(())
}
