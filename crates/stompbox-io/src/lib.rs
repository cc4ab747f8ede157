//! Audio I/O and the chunked processing pipeline for stompbox.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_signal`], [`write_signal`] and [`read_wav_info`]
//! - **Streaming output**: [`ChunkWriter`] writes to a temporary file and
//!   renames it into place only when every chunk made it to disk
//! - **Effect processing**: [`process`] streams a [`Signal`] through an effect
//!   one second at a time, reporting [`Progress`] and honouring a
//!   [`CancelToken`]
//! - **Peak normalization**: [`normalize`] rescales the processed signal to
//!   the original's peak
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stompbox_config::{EffectKind, EffectParams};
//! use stompbox_io::{CancelToken, OutputSink, load_and_normalize, process, read_signal};
//!
//! let (signal, spec) = read_signal("take1.wav")?;
//! let params = EffectParams::validate(EffectKind::Phaser, &[1.0, 0.5, 1300.0, 0.0, 0.5])?;
//! let sink = OutputSink::matching("processed_output/output.wav", &spec);
//!
//! let result = process(&signal, &params, &sink, |p| println!("{:.0}%", p.fraction * 100.0), &CancelToken::new())?;
//! let normalized = load_and_normalize(&signal, &result.output_path)?;
//! ```

mod normalize;
mod processor;
mod progress;
mod signal;
mod wav;
mod writer;

pub use normalize::{load_and_normalize, normalize, normalize_strict, peak_scale};
pub use processor::{OutputSink, ProcessingResult, process};
pub use progress::{CancelToken, Progress};
pub use signal::Signal;
pub use wav::{WavFormat, WavInfo, WavSpec, read_signal, read_wav_info, write_signal};
pub use writer::ChunkWriter;

/// Numeric failures that would otherwise put NaN or infinity on disk.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// A sample that is NaN or infinite.
    #[error("non-finite sample at index {index} during {stage}")]
    NonFinite {
        /// Pipeline stage that produced it.
        stage: &'static str,
        /// Interleaved sample index.
        index: usize,
    },

    /// The processed signal is silent, so there is no peak to scale to.
    #[error("processed signal is silent; cannot scale to the original peak")]
    SilentProcessed,
}

/// Error types for audio I/O and processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// NaN or infinity caught before it reached the output.
    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),

    /// Processing was cancelled; no output was written.
    #[error("processing cancelled")]
    Cancelled,

    /// The input has no samples.
    #[error("input signal is empty")]
    EmptySignal,

    /// A sample layout the pipeline cannot handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
