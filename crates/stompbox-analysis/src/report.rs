//! Serializable run summaries.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stompbox_config::EffectKind;
use stompbox_io::Signal;

use crate::dynamics;

/// Level statistics for one signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Channel count.
    pub channels: u16,
    /// Samples per channel.
    pub frames: usize,
    /// Peak absolute sample.
    pub peak: f32,
    /// Peak in dBFS.
    pub peak_db: f32,
    /// RMS over all channels.
    pub rms: f32,
    /// RMS in dBFS.
    pub rms_db: f32,
    /// Peak-to-RMS ratio in dB.
    pub crest_factor_db: f32,
}

impl LevelStats {
    /// Measure `signal`.
    pub fn of(signal: &Signal) -> Self {
        let samples = signal.samples();
        Self {
            channels: signal.channels(),
            frames: signal.frames(),
            peak: dynamics::peak(samples),
            peak_db: dynamics::peak_db(samples),
            rms: dynamics::rms(samples),
            rms_db: dynamics::rms_db(samples),
            crest_factor_db: dynamics::crest_factor_db(samples),
        }
    }
}

/// Summary of one run, exported with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Effect applied.
    pub effect: EffectKind,
    /// Parameter values used, by name.
    pub params: BTreeMap<String, f32>,
    /// Time spent in the chunk loop.
    pub elapsed_secs: f64,
    /// Processed file.
    pub output_path: PathBuf,
    /// Sample rate shared by input and output.
    pub sample_rate: u32,
    /// Input levels.
    pub original: LevelStats,
    /// Output levels as written.
    pub processed: LevelStats,
    /// Output levels after peak normalization.
    pub normalized: LevelStats,
    /// Normalization factor.
    pub scale: f32,
    /// Mean squared error between original and normalized.
    pub mse: f64,
    /// Square root of `mse`, in sample units.
    pub rmse: f64,
    /// SNR of normalized against original; `null` when they are identical.
    pub snr_db: Option<f64>,
}

impl Report {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a report back from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let signal = Signal::mono(4, vec![0.5, -0.25, 0.0, 0.0]).unwrap();
        let stats = LevelStats::of(&signal);
        let mut params = BTreeMap::new();
        params.insert("drive_db".to_string(), 12.0);
        Report {
            effect: EffectKind::Distortion,
            params,
            elapsed_secs: 0.25,
            output_path: PathBuf::from("processed_output/output.wav"),
            sample_rate: 4,
            original: stats,
            processed: stats,
            normalized: stats,
            scale: 1.0,
            mse: 0.0,
            rmse: 0.0,
            snr_db: None,
        }
    }

    #[test]
    fn json_field_names() {
        let json = sample_report().to_json().unwrap();
        assert!(json.contains("\"effect\": \"distortion\""));
        assert!(json.contains("\"drive_db\": 12.0"));
        assert!(json.contains("\"snr_db\": null"));
    }

    #[test]
    fn json_round_trip() {
        let report = sample_report();
        let back = Report::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn level_stats() {
        let signal = Signal::new(4, 2, vec![0.5, -0.5, 0.5, -0.5]).unwrap();
        let stats = LevelStats::of(&signal);
        assert_eq!(stats.channels, 2);
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-7);
        assert!((stats.peak_db + 6.0206).abs() < 1e-3);
        assert!((stats.rms_db - stats.peak_db).abs() < 1e-5);
        assert!(stats.crest_factor_db.abs() < 1e-5);
    }
}
