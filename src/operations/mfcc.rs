//! MFCC extraction for single spectrum frames.
//!
//! [`MfccExtractor`] ties the pipeline together:
//!
//! ```text
//! spectrum → FilterBank → bands ─┬─────────────────────────────→ MfccFrame::bands
//!                                └→ log compression → DctMatrix → MfccFrame::coefficients
//! ```
//!
//! The filter bank and the DCT table are built once when the extractor is
//! configured and are only read afterwards, so a configured extractor can be
//! shared between threads and `compute` called concurrently.

use ndarray::Array1;

use super::dct::DctMatrix;
use super::filterbank::FilterBank;
use super::types::MfccConfig;
use crate::{MfccError, MfccResult};

#[cfg(feature = "parallel-processing")]
use rayon::prelude::*;

/// Output of one [`MfccExtractor::compute`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct MfccFrame {
    /// Band energies, before log compression
    pub bands: Array1<f64>,
    /// Cepstral coefficients
    pub coefficients: Array1<f64>,
}

/// Mel-frequency cepstral coefficient extractor.
///
/// # Examples
///
/// ```rust
/// use audio_mfcc::{LogType, MfccConfig, MfccExtractor};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MfccConfig::new()
///     .with_input_size(513)
///     .with_log_type(LogType::DbPow);
/// let extractor = MfccExtractor::new(config)?;
///
/// let silence = extractor.compute(&vec![0.0; 513])?;
/// assert!(silence.bands.iter().all(|&b| b == 0.0));
/// assert!(silence.coefficients.iter().all(|c| c.is_finite()));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MfccExtractor {
    config: MfccConfig,
    filter_bank: FilterBank,
    dct: DctMatrix,
}

impl MfccExtractor {
    /// Validates `config` and precomputes the filter bank and DCT table.
    ///
    /// # Errors
    /// Returns [`MfccError::Configuration`] if the configuration is invalid.
    pub fn new(config: MfccConfig) -> MfccResult<Self> {
        config.validate()?;

        let filter_bank = FilterBank::build_reported(&config, config.input_size);
        let dct = DctMatrix::from_config(&config)?;

        tracing::debug!(
            input_size = config.input_size,
            sample_rate = config.sample_rate,
            number_bands = config.number_bands,
            number_coefficients = config.number_coefficients,
            low_frequency_bound = config.low_frequency_bound,
            high_frequency_bound = config.high_frequency_bound,
            warping_formula = %config.warping_formula,
            log_type = %config.log_type,
            "configured MFCC extractor"
        );

        Ok(Self {
            config,
            filter_bank,
            dct,
        })
    }

    /// Replaces the configuration and rebuilds the precomputed state.
    ///
    /// # Errors
    /// Returns [`MfccError::Configuration`] if the configuration is invalid,
    /// in which case the extractor keeps its previous configuration.
    pub fn configure(&mut self, config: MfccConfig) -> MfccResult<()> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Computes the bands and coefficients of one spectrum frame.
    ///
    /// A spectrum whose length differs from the configured `input_size` is
    /// accepted: a filter bank for its actual length is built for this call
    /// only.
    ///
    /// # Errors
    /// Returns [`MfccError::Compute`] if the spectrum has fewer than 2 bins.
    pub fn compute(&self, spectrum: &[f64]) -> MfccResult<MfccFrame> {
        if spectrum.len() < 2 {
            return Err(MfccError::compute(format!(
                "a filter bank cannot be computed from a spectrum with less than 2 bins (got {})",
                spectrum.len()
            )));
        }

        let bands = if spectrum.len() == self.filter_bank.spectrum_size() {
            self.filter_bank.apply(spectrum)?
        } else {
            let frame_bank = FilterBank::build(&self.config, spectrum.len());
            tracing::debug!(
                expected = self.filter_bank.spectrum_size(),
                actual = spectrum.len(),
                degenerate = frame_bank.degenerate_count(),
                "spectrum size differs from inputSize, building a filter bank for this frame"
            );
            frame_bank.apply(spectrum)?
        };

        let floor = self.config.silence_threshold;
        let log_type = self.config.log_type;
        let log_bands: Vec<f64> = bands.iter().map(|&b| log_type.compress(b, floor)).collect();
        let coefficients = self.dct.transform(&log_bands)?;

        tracing::trace!(bins = spectrum.len(), "computed MFCC frame");

        Ok(MfccFrame {
            bands,
            coefficients,
        })
    }

    /// Computes every frame of `spectra`, in order.
    ///
    /// Frames are independent; with the `parallel-processing` feature they
    /// are computed on the `rayon` thread pool.
    ///
    /// # Errors
    /// Returns the error of a failing frame; no partial output is returned.
    pub fn compute_batch<S>(&self, spectra: &[S]) -> MfccResult<Vec<MfccFrame>>
    where
        S: AsRef<[f64]> + Sync,
    {
        #[cfg(feature = "parallel-processing")]
        {
            spectra
                .par_iter()
                .map(|spectrum| self.compute(spectrum.as_ref()))
                .collect()
        }

        #[cfg(not(feature = "parallel-processing"))]
        {
            spectra
                .iter()
                .map(|spectrum| self.compute(spectrum.as_ref()))
                .collect()
        }
    }

    /// The active configuration.
    pub const fn config(&self) -> &MfccConfig {
        &self.config
    }

    /// The filter bank built for the configured `input_size`.
    pub const fn filter_bank(&self) -> &FilterBank {
        &self.filter_bank
    }

    /// The DCT table built for the configured band and coefficient counts.
    pub const fn dct_matrix(&self) -> &DctMatrix {
        &self.dct
    }
}
