//! Stompbox Effects - the five effect kinds
//!
//! Four effects are stateful per-channel [`Effect`](stompbox_core::Effect)
//! implementors, safe to drive chunk by chunk:
//!
//! - [`Chorus`] - LFO-modulated short delay
//! - [`Reverb`] - Freeverb comb/allpass network
//! - [`Distortion`] - Drive into tanh soft clipping
//! - [`Phaser`] - Six swept first-order allpass stages
//!
//! The fifth, the recursive echo in [`echo`], needs the whole channel at once
//! and is exposed as a plain function.
//!
//! Every kind publishes an ordered [`ParamDescriptor`](stompbox_core::ParamDescriptor)
//! table (`CHORUS_PARAMS`, `REVERB_PARAMS`, ...) that doubles as its
//! validation schema.
//!
//! ## Example
//!
//! ```rust
//! use stompbox_core::Effect;
//! use stompbox_effects::Distortion;
//!
//! let mut dist = Distortion::new(48000.0);
//! dist.set_drive_db(20.0);
//!
//! let mut chunk = [0.1, 0.2, -0.3];
//! dist.process_block_inplace(&mut chunk);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chorus;
pub mod distortion;
pub mod echo;
pub mod phaser;
pub mod reverb;

pub use chorus::{CHORUS_PARAMS, Chorus};
pub use distortion::{DISTORTION_PARAMS, Distortion};
pub use echo::{ECHO_PARAMS, apply_delay};
pub use phaser::{PHASER_PARAMS, Phaser};
pub use reverb::{REVERB_PARAMS, Reverb};
