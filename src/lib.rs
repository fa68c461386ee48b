// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # AudioMfcc
//!
//! Mel-frequency cepstral coefficient (MFCC) extraction from a single, already
//! computed spectrum frame.
//!
//! ## Overview
//!
//! The crate takes one magnitude or power spectrum (the output of an upstream
//! windowing + FFT stage) and turns it into two vectors:
//!
//! - **bands**: energies of a bank of triangular, mel-spaced filters, and
//! - **coefficients**: the DCT of the log-compressed bands.
//!
//! Reading audio, framing, windowing, the FFT itself and averaging results
//! across frames are left to the caller.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! audio_mfcc = "0.1.0"
//! ```
//!
//! ## Features
//!
//! - `parallel-processing`: [`MfccExtractor::compute_batch`] runs frames in parallel (using `rayon`)
//! - `serialization`: `serde` support for [`MfccConfig`] and its option enums
//!
//! ## Error Handling
//!
//! Configuration problems and compute problems are reported through a single
//! error type:
//!
//! ```rust
//! use audio_mfcc::{MfccConfig, MfccError, MfccExtractor};
//!
//! let config = MfccConfig::new().with_bands(10).with_coefficients(13);
//!
//! match MfccExtractor::new(config) {
//!     Ok(_) => unreachable!("13 coefficients cannot come out of 10 bands"),
//!     Err(MfccError::Configuration { parameter, reason }) => {
//!         eprintln!("bad {parameter}: {reason}")
//!     }
//!     Err(other) => eprintln!("other error: {other}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use audio_mfcc::{MfccConfig, MfccExtractor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = MfccExtractor::new(MfccConfig::default())?;
//!
//! // 1025 bins: the spectrum of a 2048-sample frame
//! let spectrum = vec![1.0f64; 1025];
//! let frame = extractor.compute(&spectrum)?;
//!
//! assert_eq!(frame.bands.len(), 40);
//! assert_eq!(frame.coefficients.len(), 13);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ### HTK-style extraction
//!
//! ```rust
//! use audio_mfcc::{MfccConfig, MfccExtractor};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 1102-sample frames give 552 bins
//! let config = MfccConfig::htk().with_input_size(552);
//! let extractor = MfccExtractor::new(config)?;
//!
//! let frame = extractor.compute(&vec![0.5f64; 552])?;
//! assert_eq!(frame.coefficients.len(), 20);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Building blocks
//!
//! The pieces the extractor is made of are public and usable on their own:
//!
//! - [`audio_math`] - mel warping and decibel/log conversions
//! - [`FilterBank`] - triangular filter bank construction and band energies
//! - [`DctMatrix`] - precomputed DCT type II / III tables with optional liftering
//!
//! ## License
//!
//! MIT License

mod error;

pub mod operations;
pub mod utils;

pub use crate::error::{MfccError, MfccResult};
pub use crate::operations::{
    DctMatrix, DctType, FilterBank, FilterNormalization, FilterWeighting, LogType, MfccConfig,
    MfccExtractor, MfccFrame, SpectrumType, TriangularFilter, WarpingFormula,
};
pub use crate::utils::audio_math::{
    self, amplitude_to_db, hz_to_mel, hz_to_mel_slaney, mel_to_hz, mel_to_hz_slaney, natural_log,
    power_to_db,
};

use num_traits::{Float, FloatConst, NumCast};

/// Marker trait for real floating-point types (f32, f64)
pub trait RealFloat: Float + FloatConst + NumCast {}

impl RealFloat for f32 {}
impl RealFloat for f64 {}

/// Casts a numeric value into the target floating-point type `F`.
///
/// Used by the generic helpers in [`audio_math`] so the same formula can be
/// evaluated in either `f32` or `f64` precision without explicit `as`
/// conversions.
///
/// # Examples
/// ```
/// use audio_mfcc::to_precision;
///
/// let value_f32: f32 = to_precision(2595.0f64);
/// assert_eq!(value_f32, 2595.0);
/// ```
///
/// # Panics
/// Panics if the numeric conversion fails.
#[inline(always)]
pub fn to_precision<F, T>(value: T) -> F
where
    F: RealFloat + NumCast,
    T: NumCast,
{
    NumCast::from(value).expect("safe_cast: valid numeric conversion")
}
