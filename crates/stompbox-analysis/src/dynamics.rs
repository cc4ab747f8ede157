//! Level measurements.

use stompbox_core::linear_to_db;

/// RMS level in linear scale.
pub fn rms(signal: &[f32]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = signal.iter().map(|&x| f64::from(x) * f64::from(x)).sum();
    (sum_sq / signal.len() as f64).sqrt() as f32
}

/// RMS level in dB. Silence reads as -200 dB.
pub fn rms_db(signal: &[f32]) -> f32 {
    linear_to_db(rms(signal))
}

/// Peak level (maximum absolute value).
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |m, x| m.max(x.abs()))
}

/// Peak level in dB. Silence reads as -200 dB.
pub fn peak_db(signal: &[f32]) -> f32 {
    linear_to_db(peak(signal))
}

/// Crest factor (peak-to-RMS ratio); 0 for silence.
///
/// A sine reads about 1.41 (3 dB); a hard-clipped square approaches 1.
pub fn crest_factor(signal: &[f32]) -> f32 {
    let rms_val = rms(signal);
    if rms_val > 1e-10 {
        peak(signal) / rms_val
    } else {
        0.0
    }
}

/// Crest factor in dB.
pub fn crest_factor_db(signal: &[f32]) -> f32 {
    let cf = crest_factor(signal);
    if cf > 1e-10 { 20.0 * cf.log10() } else { 0.0 }
}
