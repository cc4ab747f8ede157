//! Core effect trait.
//!
//! An [`Effect`] processes one channel of audio. Multi-channel signals get one
//! instance per channel; instances never share state with each other.

/// A stateful single-channel audio transform.
///
/// Implementations keep their internal state (delay lines, filter memories,
/// LFO phase) between calls. Feeding a signal through [`process_block`] in
/// several consecutive pieces produces exactly the same output as feeding it
/// in one piece, which is what lets a streaming processor cut the input into
/// chunks without clicks at the boundaries.
///
/// The trait is object-safe so effects can be stored as `Box<dyn Effect>`.
///
/// [`process_block`]: Effect::process_block
///
/// # Example
///
/// ```rust
/// use stompbox_core::Effect;
///
/// struct Gain(f32);
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain(0.5);
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// `input` and `output` must have the same length.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate. Coefficients depending on it are recomputed.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear all internal state (delay lines, filter memories, LFO phase).
    fn reset(&mut self);
}
