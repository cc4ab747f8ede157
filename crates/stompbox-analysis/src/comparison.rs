//! Bundles the signals and timing of one processing run.

use std::path::PathBuf;
use std::time::Duration;

use stompbox_config::EffectParams;
use stompbox_io::{ProcessingResult, Signal, normalize, peak_scale, read_signal};

use crate::{LevelStats, Report, compare};

/// Everything a plotting or playback front end needs after a run.
///
/// Pure aggregation: building one does no signal processing beyond what
/// [`Comparison::from_output`] documents.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// The unprocessed input.
    pub original: Signal,
    /// The processed output as written.
    pub processed: Signal,
    /// `processed` rescaled to the original's peak.
    pub normalized: Signal,
    /// Factor applied to get `normalized`; 1.0 for a silent output.
    pub scale: f32,
    /// Time spent in the chunk loop.
    pub elapsed: Duration,
    /// Where the processed file was written.
    pub output_path: PathBuf,
}

impl Comparison {
    /// Assemble from an already normalized signal.
    pub fn new(original: Signal, result: ProcessingResult, normalized: Signal) -> Self {
        let scale = peak_scale(&original, &result.processed).unwrap_or(1.0);
        Self {
            original,
            processed: result.processed,
            normalized,
            scale,
            elapsed: result.elapsed,
            output_path: result.output_path,
        }
    }

    /// Read the written file back, normalize it and assemble.
    ///
    /// The stored samples replace the in-memory ones, so quantization from an
    /// integer output format shows up in the comparison.
    pub fn from_output(original: Signal, result: ProcessingResult) -> stompbox_io::Result<Self> {
        let (stored, _) = read_signal(&result.output_path)?;
        let scale = peak_scale(&original, &stored).unwrap_or(1.0);
        let normalized = normalize(&original, &stored)?;
        Ok(Self {
            original,
            processed: stored,
            normalized,
            scale,
            elapsed: result.elapsed,
            output_path: result.output_path,
        })
    }

    /// Elapsed processing time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Original samples laid out like `normalized`.
    ///
    /// When the output dropped to mono, this is the original's first channel.
    pub fn reference(&self) -> Vec<f32> {
        if self.original.channels() == self.normalized.channels() {
            self.original.samples().to_vec()
        } else {
            self.original.channel(0)
        }
    }

    /// Summarize the run.
    pub fn report(&self, params: &EffectParams) -> Report {
        let reference = self.reference();
        let normalized = self.normalized.samples();
        Report {
            effect: params.kind(),
            params: params.to_named(),
            elapsed_secs: self.elapsed_secs(),
            output_path: self.output_path.clone(),
            sample_rate: self.original.sample_rate(),
            original: LevelStats::of(&self.original),
            processed: LevelStats::of(&self.processed),
            normalized: LevelStats::of(&self.normalized),
            scale: self.scale,
            mse: compare::mse(&reference, normalized),
            rmse: compare::rmse(&reference, normalized),
            snr_db: compare::snr_db(&reference, normalized),
        }
    }
}
