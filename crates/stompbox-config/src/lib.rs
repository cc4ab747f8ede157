//! Effect selection, parameter validation and processing requests.
//!
//! This crate turns loosely typed input (an effect name and a list or map of
//! numbers) into validated values the processor can trust:
//!
//! - [`EffectKind`] names one of the five effects and knows its parameter schema
//! - [`EffectParams::validate`] checks a positional value list against that schema
//! - [`create_effect`] builds a fresh per-channel effect from validated params
//! - [`Request`] is the immutable description of one processing run, loadable
//!   from TOML
//!
//! # Example
//!
//! ```rust
//! use stompbox_config::{EffectKind, EffectParams};
//!
//! let params = EffectParams::validate(EffectKind::Delay, &[1.0, 0.5]).unwrap();
//! assert_eq!(params.get("decay"), Some(0.5));
//!
//! assert!(EffectParams::validate(EffectKind::Delay, &[3.0, 0.5]).is_err());
//! ```

mod error;
mod factory;
mod kind;
pub mod params;
mod request;

pub use error::{ConfigError, ValidationError};
pub use factory::create_effect;
pub use kind::EffectKind;
pub use params::EffectParams;
pub use request::{DEFAULT_OUTPUT_PATH, Request};
