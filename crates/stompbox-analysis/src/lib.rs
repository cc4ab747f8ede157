//! Comparison of original and processed audio.
//!
//! - [`Comparison`] gathers the original, processed and normalized signals
//!   with the elapsed processing time and output path
//! - [`dynamics`] - level measurements (peak, RMS, crest factor)
//! - [`compare`] - difference metrics (MSE, RMSE, SNR)
//! - [`Report`] - serializable summary of a run, for JSON export
//!
//! ## Example
//!
//! ```rust,ignore
//! use stompbox_analysis::Comparison;
//!
//! let result = process(&signal, &params, &sink, |_| {}, &CancelToken::new())?;
//! let comparison = Comparison::from_output(signal, result)?;
//! let report = comparison.report(&params);
//! println!("{}", report.to_json()?);
//! ```

pub mod compare;
mod comparison;
pub mod dynamics;
mod report;

pub use comparison::Comparison;
pub use report::{LevelStats, Report};
