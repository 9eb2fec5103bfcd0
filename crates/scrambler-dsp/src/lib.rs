//! Scrambler DSP - the stereo reverb algorithm
//!
//! This crate assembles the primitives from `scrambler-core` into the
//! Freeverb network the plugin renders with:
//!
//! - [`Reverb`] - 8 damped combs and 4 allpasses per channel, stereo spread
//! - [`ReverbSettings`] - the five user-facing controls the reverb is driven by
//!
//! ## Example
//!
//! ```rust
//! use scrambler_dsp::{Reverb, ReverbSettings};
//!
//! let mut reverb = Reverb::new(48000.0);
//! reverb.set_settings(ReverbSettings { room_size: 0.8, ..ReverbSettings::default() });
//!
//! let mut left = [0.5f32; 64];
//! let mut right = [0.5f32; 64];
//! reverb.process_stereo(&mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod reverb;

pub use reverb::{Reverb, ReverbSettings};
