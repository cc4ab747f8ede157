//! Difference metrics between a reference and a test signal.
//!
//! All functions compare the overlapping prefix when lengths differ.

/// Mean squared error.
pub fn mse(reference: &[f32], test: &[f32]) -> f64 {
    let len = reference.len().min(test.len());
    if len == 0 {
        return 0.0;
    }

    let sum: f64 = reference[..len]
        .iter()
        .zip(&test[..len])
        .map(|(&a, &b)| (f64::from(a) - f64::from(b)).powi(2))
        .sum();

    sum / len as f64
}

/// Root mean squared error.
pub fn rmse(reference: &[f32], test: &[f32]) -> f64 {
    mse(reference, test).sqrt()
}

/// Signal-to-noise ratio in dB, treating `test - reference` as noise.
///
/// Returns `None` when the signals are identical (infinite SNR). A silent
/// reference gives a large negative but finite value.
pub fn snr_db(reference: &[f32], test: &[f32]) -> Option<f64> {
    let len = reference.len().min(test.len());
    let signal_power: f64 = reference[..len].iter().map(|&x| f64::from(x).powi(2)).sum();
    let noise_power: f64 = reference[..len]
        .iter()
        .zip(&test[..len])
        .map(|(&r, &t)| (f64::from(r) - f64::from(t)).powi(2))
        .sum();

    if noise_power > 1e-20 {
        Some(10.0 * (signal_power.max(1e-20) / noise_power).log10())
    } else {
        None
    }
}
