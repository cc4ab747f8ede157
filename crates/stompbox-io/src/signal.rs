//! Interleaved multi-channel sample buffers.

use crate::{Error, Result};

/// An interleaved signal with a fixed sample rate and channel count.
///
/// Samples are `f32`, nominally in `[-1, 1]`. The sample count is always a
/// multiple of the channel count, so every channel has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl Signal {
    /// Wrap interleaved samples.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for a zero sample rate, zero channels, or
    /// a sample count that does not divide evenly into frames.
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<f32>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::UnsupportedFormat("sample rate must be positive".into()));
        }
        if channels == 0 {
            return Err(Error::UnsupportedFormat("signal needs at least one channel".into()));
        }
        if samples.len() % usize::from(channels) != 0 {
            return Err(Error::UnsupportedFormat(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// A single-channel signal.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, 1, samples)
    }

    /// Interleave separate, equal-length channels.
    pub fn from_channels(sample_rate: u32, channels: &[Vec<f32>]) -> Result<Self> {
        let count = u16::try_from(channels.len())
            .map_err(|_| Error::UnsupportedFormat(format!("{} channels", channels.len())))?;
        let frames = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != frames) {
            return Err(Error::UnsupportedFormat("channels differ in length".into()));
        }

        let mut samples = Vec::with_capacity(frames * channels.len());
        for frame in 0..frames {
            samples.extend(channels.iter().map(|c| c[frame]));
        }
        Self::new(sample_rate, count, samples)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    /// Whether the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// All samples, interleaved.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the signal, returning the interleaved samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Iterate over one channel. Out-of-range channels yield nothing.
    pub fn channel_iter(&self, channel: usize) -> impl Iterator<Item = f32> + '_ {
        let stride = usize::from(self.channels);
        let skip = if channel < stride {
            channel
        } else {
            self.samples.len()
        };
        self.samples.iter().skip(skip).step_by(stride).copied()
    }

    /// Copy one channel out.
    pub fn channel(&self, channel: usize) -> Vec<f32> {
        self.channel_iter(channel).collect()
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    /// Multiply every sample by `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            sample_rate: self.sample_rate,
            channels: self.channels,
            samples: self.samples.iter().map(|s| s * scale).collect(),
        }
    }
}
