//! Stompbox Core - DSP primitives for single-channel audio effects
//!
//! This crate provides the building blocks the stompbox effects are assembled
//! from. Every effect is a stateful per-channel transform: samples go in one at
//! a time (or a block at a time) and the internal state carries over from one
//! call to the next, so a long signal can be fed in arbitrary chunks without
//! discontinuities at chunk boundaries.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for all per-channel effects
//! - [`ParameterInfo`] - Index-based parameter introspection
//! - [`EffectWithParams`] - Object-safe bridge combining both for boxed effects
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedParam`] - Exponential smoothing (RC-like response)
//!
//! ## Filters and Delay Lines
//!
//! - [`InterpolatedDelay`] - Variable-length delay with linear interpolation
//! - [`CombFilter`] - Comb filter with damping for reverb algorithms
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Modulation
//!
//! - [`Lfo`] - Sine low-frequency oscillator
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`soft_clip`], etc.
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build against `alloc` only:
//!
//! ```toml
//! [dependencies]
//! stompbox-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod comb;
pub mod delay;
pub mod effect;
pub mod effect_with_params;
pub mod lfo;
pub mod math;
pub mod param;
pub mod param_info;

pub use allpass::AllpassFilter;
pub use comb::CombFilter;
pub use delay::InterpolatedDelay;
pub use effect::Effect;
pub use effect_with_params::EffectWithParams;
pub use lfo::Lfo;
pub use math::{db_to_linear, flush_denormal, linear_to_db, ms_to_samples, soft_clip, wet_dry_mix};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
