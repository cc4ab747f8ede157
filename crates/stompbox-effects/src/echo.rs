//! Recursive feedback echo over a whole channel.
//!
//! Unlike the other effects this is not an [`Effect`](stompbox_core::Effect):
//! every output sample depends on an earlier *output* sample, so the filter
//! runs over the complete channel in a single forward pass and is never split
//! at chunk boundaries.
//!
//! ```text
//! D    = floor(delay_time_s * sample_rate)
//! y[i] = x[i]                   for i < D
//! y[i] = x[i] + decay * y[i-D]  for i >= D
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use stompbox_core::{ParamDescriptor, ParamUnit};

/// Echo parameter table, in positional order.
pub const ECHO_PARAMS: [ParamDescriptor; 2] = [
    ParamDescriptor::new("delay_time_s", "Delay Time", ParamUnit::Seconds, 0.0, 2.0, 0.5),
    ParamDescriptor::new("decay", "Decay", ParamUnit::None, 0.0, 1.0, 0.5),
];

/// Echo distance in whole samples: `floor(delay_time_s * sample_rate)`.
///
/// Computed in `f64` so that e.g. 1 s at 44.1 kHz is exactly 44100.
pub fn delay_samples(sample_rate: u32, delay_time_s: f32) -> usize {
    let samples = (f64::from(delay_time_s) * f64::from(sample_rate)).floor();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Apply the recursive echo to one channel.
///
/// Always returns as many samples as it was given. No bound is placed on the
/// output: a decay of 1 keeps adding energy with every repeat.
///
/// A zero delay distance leaves the signal unchanged. The recurrence would
/// read `y[i]` while computing `y[i]`; that slot still holds its initial zero,
/// so each sample reduces to `x[i] + decay * 0`.
///
/// ```rust
/// use stompbox_effects::echo::apply_delay;
///
/// let out = apply_delay(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], 4, 1.0, 0.5);
/// assert_eq!(out, vec![1.0, 0.0, 0.0, 0.0, 1.5, 0.0, 0.0, 0.0]);
/// ```
pub fn apply_delay(input: &[f32], sample_rate: u32, delay_time_s: f32, decay: f32) -> Vec<f32> {
    let distance = delay_samples(sample_rate, delay_time_s);
    let mut output = Vec::with_capacity(input.len());

    for (i, &x) in input.iter().enumerate() {
        let y = match i.checked_sub(distance) {
            Some(j) if distance > 0 => x + decay * output[j],
            // Zero distance: the self-referenced slot is still zero.
            Some(_) | None => x,
        };
        output.push(y);
    }

    output
}
