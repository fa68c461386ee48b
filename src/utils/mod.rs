//! Utility functions for audio processing.
//!
//! # Modules
//!
//! - [`audio_math`] - Frequency warping and level/log conversions

pub mod audio_math;
