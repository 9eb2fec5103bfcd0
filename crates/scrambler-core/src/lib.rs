//! Scrambler Core - DSP primitives for the scrambler reverb
//!
//! This crate provides the building blocks the reverb network is assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path. Every type allocates its storage once at construction and
//! never reallocates afterwards.
//!
//! # Building Blocks
//!
//! - [`DelayLine`] - Fixed-length circular buffer
//! - [`CombFilter`] - Feedback comb with one-pole damping (Freeverb style)
//! - [`AllpassFilter`] - Schroeder allpass diffuser
//! - [`SmoothedParam`] - Exponential smoothing for zipper-free coefficient changes
//!
//! # Parameters
//!
//! - [`ParamDescriptor`] - Metadata for host and UI parameter enumeration
//! - [`ParamId`] - Host automation identifier
//!
//! # no_std Support
//!
//! Disable the default `std` feature to use the primitives on embedded
//! targets:
//!
//! ```toml
//! [dependencies]
//! scrambler-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod comb;
pub mod delay;
pub mod math;
pub mod param;
pub mod param_info;

pub use allpass::AllpassFilter;
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use math::{flush_denormal, linear_to_db};
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamDisplay, ParamId};
