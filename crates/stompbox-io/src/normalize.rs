//! Peak normalization.
//!
//! Effects change level; scaling the processed signal so its peak matches
//! the original's makes the two directly comparable.

use std::path::Path;

use tracing::{debug, warn};

use crate::{NumericError, Result, Signal, read_signal};

/// `peak(original) / peak(processed)`, or `None` when the processed signal is
/// silent.
pub fn peak_scale(original: &Signal, processed: &Signal) -> Option<f32> {
    let processed_peak = processed.peak();
    (processed_peak > 0.0).then(|| original.peak() / processed_peak)
}

/// Scale `processed` so its peak equals the original's.
///
/// A silent processed signal has no peak to scale; it is returned unchanged
/// (scale 1.0) and a warning is logged. Use [`normalize_strict`] to treat that
/// as an error instead.
///
/// # Errors
///
/// [`NumericError::NonFinite`] if scaling would produce NaN or infinity, for
/// example when the processed peak is so small the scale overflows.
pub fn normalize(original: &Signal, processed: &Signal) -> Result<Signal> {
    let scale = match peak_scale(original, processed) {
        Some(scale) => scale,
        None => {
            warn!("processed signal is silent; leaving it unscaled");
            1.0
        }
    };
    apply_scale(processed, scale)
}

/// Like [`normalize`], but a silent processed signal is an error.
pub fn normalize_strict(original: &Signal, processed: &Signal) -> Result<Signal> {
    let scale = peak_scale(original, processed).ok_or(NumericError::SilentProcessed)?;
    apply_scale(processed, scale)
}

/// Read the written output back and normalize it against `original`.
///
/// Normalizing what is actually on disk includes any quantization and
/// clipping the output format applied.
pub fn load_and_normalize(original: &Signal, output_path: impl AsRef<Path>) -> Result<Signal> {
    let (stored, _) = read_signal(output_path)?;
    normalize(original, &stored)
}

fn apply_scale(processed: &Signal, scale: f32) -> Result<Signal> {
    if !scale.is_finite() {
        return Err(NumericError::NonFinite {
            stage: "normalize",
            index: 0,
        }
        .into());
    }
    debug!(scale, "normalizing");

    let normalized = processed.scaled(scale);
    if let Some(index) = normalized.samples().iter().position(|s| !s.is_finite()) {
        return Err(NumericError::NonFinite {
            stage: "normalize",
            index,
        }
        .into());
    }
    Ok(normalized)
}
