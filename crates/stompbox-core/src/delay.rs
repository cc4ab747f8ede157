//! Circular delay line with fractional (linearly interpolated) reads.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Heap-allocated delay line.
///
/// `read(d)` returns the sample written `d + 1` writes ago, so a read followed
/// by a write (see [`read_write`](Self::read_write)) gives a delay of `d + 1`
/// samples relative to the incoming sample. Fractional delays interpolate
/// linearly between neighbours.
///
/// ```rust
/// use stompbox_core::InterpolatedDelay;
///
/// let mut delay = InterpolatedDelay::new(8);
/// delay.write(1.0);
/// delay.write(0.0);
/// assert_eq!(delay.read(1.0), 1.0);
/// assert!((delay.read(0.5) - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl InterpolatedDelay {
    /// Create a delay line holding `max_delay_samples` samples.
    ///
    /// A zero size is rounded up to one slot.
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; max_delay_samples.max(1)],
            write_pos: 0,
        }
    }

    /// Create a delay line long enough for `max_seconds` at `sample_rate`.
    pub fn from_time(sample_rate: f32, max_seconds: f32) -> Self {
        Self::new((sample_rate * max_seconds) as usize + 2)
    }

    /// Read with a fractional delay. Delays beyond capacity are clamped.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.max(0.0).min((len - 1) as f32);
        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let read_pos = (self.write_pos + len - delay_int - 1) % len;
        let older = (read_pos + len - 1) % len;

        let a = self.buffer[read_pos];
        let b = self.buffer[older];
        a + (b - a) * frac
    }

    /// Push a sample into the line.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read at `delay_samples`, then write `sample`.
    #[inline]
    pub fn read_write(&mut self, sample: f32, delay_samples: f32) -> f32 {
        let output = self.read(delay_samples);
        self.write(sample);
        output
    }

    /// Zero the buffer.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Number of samples the line holds.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
