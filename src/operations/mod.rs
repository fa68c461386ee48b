//! MFCC pipeline stages.
//!
//! Each stage lives in its own module and can be used on its own:
//!
//! - [`types`] - Configuration and the enums it is made of
//! - [`filterbank`] - Triangular filter bank over spectrum bins
//! - [`dct`] - Precomputed DCT tables with optional liftering
//! - [`mfcc`] - The extractor combining the stages
//!
//! ## Quick Start
//!
//! ```rust
//! use audio_mfcc::operations::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MfccConfig::default();
//!
//! // Stages on their own
//! let bank = FilterBank::new(&config)?;
//! let bands = bank.apply(&vec![1.0; config.input_size])?;
//! let dct = DctMatrix::from_config(&config)?;
//! let log_bands: Vec<f64> = bands.iter().map(|&b| config.log_type.compress(b, config.silence_threshold)).collect();
//! let coefficients = dct.transform(&log_bands)?;
//!
//! // Or all at once
//! let frame = MfccExtractor::new(config)?.compute(&vec![1.0; config.input_size])?;
//! assert_eq!(frame.coefficients, coefficients);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod dct;
pub mod filterbank;
pub mod mfcc;
pub mod types;

pub use dct::DctMatrix;
pub use filterbank::{FilterBank, TriangularFilter};
pub use mfcc::{MfccExtractor, MfccFrame};

// Re-export supporting types
pub use types::{
    DctType, FilterNormalization, FilterWeighting, LogType, MfccConfig, SpectrumType,
    WarpingFormula,
};
