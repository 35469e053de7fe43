// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::vec_box)] // Avoids using `Vec<Box<T>>` when unnecessary
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![allow(clippy::too_many_arguments)]
// Allow functions with many parameters (very few and far between)
#![deny(missing_docs)] // Documentation is a must for release

//! # acoustic_signals
//!
//! Acoustic signal containers, DSP helpers and plot data, with a versioned
//! deprecation policy covering the whole public API.
//!
//! ## Overview
//!
//! - [`Signal`]: multi-channel time data at a fixed sampling rate.
//! - [`Coordinates`]: sampling points in cartesian, spherical and cylindrical
//!   conventions, with nearest-neighbour and range queries.
//! - [`dsp`]: zero padding and IIR filter design (Butterworth, Chebyshev,
//!   elliptic, bell) as second-order sections.
//! - [`signals`]: linear and exponential sine sweeps.
//! - [`io`]: WAV reading and writing.
//! - [`plot`]: axes descriptors for time, spectrum, phase, group delay and
//!   spectrogram plots. Nothing is rendered.
//!
//! ## Deprecations
//!
//! Functions and argument values that are on their way out take a
//! [`DeprecationGate`]. Before the scheduled cutover the gate lets the call run
//! and emits a notice; from the cutover on it refuses the call with
//! [`AcousticError::MemberRemoved`] or [`AcousticError::InvalidValue`].
//!
//! ```rust
//! use acoustic_signals::{DeprecationGate, Signal};
//!
//! let signal = Signal::from_samples(vec![0.0, 1.0, 0.0], 44100.0).unwrap();
//!
//! let (gate, notices) = DeprecationGate::recording("0.7.0").unwrap();
//! assert_eq!(signal.len(&gate).unwrap(), 3);
//! assert_eq!(notices.count_matching("0.8.0"), 1);
//!
//! let gate = DeprecationGate::at_version("0.8.0").unwrap();
//! assert!(signal.len(&gate).unwrap_err().is_removal());
//! ```
//!
//! The gate used in production comes from [`DeprecationGate::current`] or
//! from a [`CompatConfig`]; notices go to `tracing` at `warn` level.

mod error;

pub mod config;
pub mod coordinates;
pub mod deprecation;
pub mod dsp;
pub mod io;
pub mod plot;
pub mod signal;
pub mod signals;
pub mod version;

pub use config::CompatConfig;
pub use coordinates::Coordinates;
pub use deprecation::DeprecationGate;
pub use error::{AcousticError, AcousticResult};
pub use signal::Signal;

#[cfg(test)]
mod tests;
