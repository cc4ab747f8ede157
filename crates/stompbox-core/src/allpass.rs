//! Schroeder allpass filter for reverb diffusion.

use crate::InterpolatedDelay;
use crate::flush_denormal;

/// Freeverb-style allpass diffuser.
///
/// ```text
/// d      = buf[n - N]
/// y[n]   = d - x[n]
/// buf[n] = x[n] + d * feedback
/// ```
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    delay: InterpolatedDelay,
    feedback: f32,
}

impl AllpassFilter {
    /// Create an allpass with a delay of `delay_samples`.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            delay: InterpolatedDelay::new(delay_samples),
            feedback: 0.5,
        }
    }

    /// Set feedback, clamped to `[-0.99, 0.99]`.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read((self.delay.capacity() - 1) as f32);
        let output = delayed - input;
        self.delay
            .write(flush_denormal(input + delayed * self.feedback));
        output
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.delay.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allpass_impulse_response() {
        let mut allpass = AllpassFilter::new(10);
        allpass.set_feedback(0.5);

        assert!((allpass.process(1.0) + 1.0).abs() < 1e-6, "first output is -input");
        for _ in 0..9 {
            assert_eq!(allpass.process(0.0), 0.0);
        }
        let delayed = allpass.process(0.0);
        assert!((delayed - 1.0).abs() < 1e-6, "delayed impulse, got {}", delayed);
    }

    #[test]
    fn test_allpass_stays_finite() {
        let mut allpass = AllpassFilter::new(37);
        allpass.set_feedback(0.7);
        for i in 0..5000 {
            let x = if i % 13 == 0 { 1.0 } else { -0.25 };
            assert!(allpass.process(x).is_finite());
        }
    }

    #[test]
    fn test_allpass_clear() {
        let mut allpass = AllpassFilter::new(10);
        for _ in 0..20 {
            allpass.process(1.0);
        }
        allpass.clear();
        assert_eq!(allpass.process(0.0), 0.0);
    }
}
