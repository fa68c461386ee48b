//! Triangular mel filter bank construction and band energy computation.
//!
//! A [`FilterBank`] is derived once from an [`MfccConfig`] and a spectrum
//! size, and is read-only afterwards. Each filter stores only the bins it
//! covers, so applying the bank costs one pass over the covered bins.
//!
//! # Construction
//!
//! `number_bands + 2` frequencies are spaced evenly on the warped scale
//! between the configured bounds. Filter `i` rises from frequency `i` to
//! frequency `i + 1` and falls back to zero at frequency `i + 2`. Each
//! frequency is mapped to a bin with
//!
//! ```text
//! bin(hz) = floor(hz / ((sample_rate / 2) / (spectrum_size - 1)) + 0.5)
//! ```
//!
//! and the filter covers the bins `bin(f_i) .. bin(f_{i+2})` (end exclusive).
//! Weights are evaluated at the exact bin frequencies, linear either on the
//! warped scale or in Hz depending on [`FilterWeighting`].
//!
//! # Degenerate filters
//!
//! When the spectrum is too coarse for the requested number of bands a filter
//! can cover a single bin or get no positive weight at all. Such a filter is
//! replaced by a unit delta at its center bin and reported through
//! [`TriangularFilter::is_degenerate`]; building never fails because of it.

use ndarray::{Array1, Array2};

use super::types::{FilterNormalization, FilterWeighting, MfccConfig, SpectrumType};
use crate::utils::audio_math::linspace;
use crate::{MfccError, MfccResult};

/// One triangular filter of a [`FilterBank`].
///
/// Weights are stored for the covered bins only, starting at
/// [`start_bin`](Self::start_bin).
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularFilter {
    start_bin: usize,
    center_bin: usize,
    end_bin: usize,
    weights: Vec<f64>,
    degenerate: bool,
}

impl TriangularFilter {
    /// First covered bin.
    pub const fn start_bin(&self) -> usize {
        self.start_bin
    }

    /// Bin nearest to the apex of the triangle.
    pub const fn center_bin(&self) -> usize {
        self.center_bin
    }

    /// One past the last covered bin.
    pub const fn end_bin(&self) -> usize {
        self.end_bin
    }

    /// Weights of the covered bins.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight of an arbitrary bin, zero outside the covered range.
    pub fn weight(&self, bin: usize) -> f64 {
        bin.checked_sub(self.start_bin)
            .and_then(|offset| self.weights.get(offset))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the triangle collapsed to a single-bin delta.
    pub const fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    fn energy(&self, spectrum: &[f64], spectrum_type: SpectrumType) -> f64 {
        spectrum[self.start_bin..self.end_bin]
            .iter()
            .zip(&self.weights)
            .map(|(&value, &weight)| spectrum_type.bin_value(value) * weight)
            .sum()
    }
}

/// Bank of triangular filters over the bins of one spectrum size.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    filters: Vec<TriangularFilter>,
    band_frequencies: Vec<f64>,
    spectrum_size: usize,
    spectrum_type: SpectrumType,
}

impl FilterBank {
    /// Builds the filter bank for the configured `input_size`.
    ///
    /// # Errors
    /// Returns a configuration error if `config` does not validate.
    pub fn new(config: &MfccConfig) -> MfccResult<Self> {
        config.validate()?;
        Ok(Self::build_reported(config, config.input_size))
    }

    /// Builds the filter bank for a spectrum of `spectrum_size` bins,
    /// ignoring the configured `input_size`.
    ///
    /// # Errors
    /// Returns a configuration error if `config` does not validate or if
    /// `spectrum_size` is below 2.
    pub fn with_spectrum_size(config: &MfccConfig, spectrum_size: usize) -> MfccResult<Self> {
        config.validate()?;
        if spectrum_size < 2 {
            return Err(MfccError::configuration(
                "inputSize",
                format!("a filter bank needs at least 2 bins, got {spectrum_size}"),
            ));
        }
        Ok(Self::build_reported(config, spectrum_size))
    }

    /// Builds like [`build`](Self::build) and warns once if any filter
    /// degenerated. Used where a bank outlives a single frame.
    pub(crate) fn build_reported(config: &MfccConfig, spectrum_size: usize) -> Self {
        let bank = Self::build(config, spectrum_size);
        let degenerate = bank.degenerate_count();
        if degenerate > 0 {
            tracing::warn!(
                degenerate,
                number_bands = config.number_bands,
                spectrum_size,
                "spectrum too coarse for the filter bank, degenerate filters replaced by deltas"
            );
        }
        bank
    }

    /// Builds without validating or logging. `config` must be valid and
    /// `spectrum_size >= 2`.
    pub(crate) fn build(config: &MfccConfig, spectrum_size: usize) -> Self {
        let band_frequencies = band_frequencies(config);
        let frequency_scale = config.nyquist() / (spectrum_size - 1) as f64;
        let last_bin = spectrum_size - 1;

        let filters: Vec<TriangularFilter> = band_frequencies
            .windows(3)
            .map(|edges| {
                let mut filter = triangle(
                    config,
                    (edges[0], edges[1], edges[2]),
                    frequency_scale,
                    spectrum_size,
                )
                .unwrap_or_else(|| {
                    let center_bin = frequency_to_bin(edges[1], frequency_scale).min(last_bin);
                    TriangularFilter {
                        start_bin: center_bin,
                        center_bin,
                        end_bin: center_bin + 1,
                        weights: vec![1.0],
                        degenerate: true,
                    }
                });

                if config.normalization == FilterNormalization::UnitSum {
                    let sum: f64 = filter.weights.iter().sum();
                    if sum > 0.0 {
                        filter.weights.iter_mut().for_each(|w| *w /= sum);
                    }
                }
                filter
            })
            .collect();

        Self {
            filters,
            band_frequencies,
            spectrum_size,
            spectrum_type: config.spectrum_type,
        }
    }

    /// Computes the energy of each band for one spectrum.
    ///
    /// Each band is the weighted sum of the covered bins, squared first when
    /// the bank was configured for [`SpectrumType::Power`].
    ///
    /// # Errors
    /// Returns a compute error if `spectrum` does not have exactly
    /// [`spectrum_size`](Self::spectrum_size) bins.
    pub fn apply(&self, spectrum: &[f64]) -> MfccResult<Array1<f64>> {
        if spectrum.len() != self.spectrum_size {
            return Err(MfccError::compute(format!(
                "filter bank built for {} bins cannot filter a spectrum of {} bins",
                self.spectrum_size,
                spectrum.len()
            )));
        }

        Ok(self
            .filters
            .iter()
            .map(|filter| filter.energy(spectrum, self.spectrum_type))
            .collect())
    }

    /// Number of filters (bands).
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the bank holds no filter.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The filters, lowest band first.
    pub fn filters(&self) -> &[TriangularFilter] {
        &self.filters
    }

    /// The `number_bands + 2` filter edge frequencies in Hz.
    pub fn band_frequencies(&self) -> &[f64] {
        &self.band_frequencies
    }

    /// Spectrum size the bank was built for.
    pub const fn spectrum_size(&self) -> usize {
        self.spectrum_size
    }

    /// Number of filters that collapsed to deltas.
    pub fn degenerate_count(&self) -> usize {
        self.filters.iter().filter(|f| f.degenerate).count()
    }

    /// Dense `(bands, spectrum_size)` weight matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.filters.len(), self.spectrum_size));
        for (mut row, filter) in dense.outer_iter_mut().zip(&self.filters) {
            for (offset, &weight) in filter.weights.iter().enumerate() {
                row[filter.start_bin + offset] = weight;
            }
        }
        dense
    }
}

/// Filter edge frequencies, evenly spaced on the warped scale.
fn band_frequencies(config: &MfccConfig) -> Vec<f64> {
    let warping = config.warping_formula;
    linspace(
        warping.warp(config.low_frequency_bound),
        warping.warp(config.high_frequency_bound),
        config.number_bands + 2,
    )
    .into_iter()
    .map(|mel| warping.unwarp(mel))
    .collect()
}

/// Nearest bin, rounding halves up.
fn frequency_to_bin(freq_hz: f64, frequency_scale: f64) -> usize {
    (freq_hz / frequency_scale + 0.5).floor() as usize
}

/// Builds one triangle, or `None` if it would not cover at least two bins
/// with some positive weight.
fn triangle(
    config: &MfccConfig,
    (low, center, high): (f64, f64, f64),
    frequency_scale: f64,
    spectrum_size: usize,
) -> Option<TriangularFilter> {
    let start_bin = frequency_to_bin(low, frequency_scale).min(spectrum_size - 1);
    let end_bin = frequency_to_bin(high, frequency_scale).min(spectrum_size);
    if end_bin <= start_bin + 1 {
        return None;
    }

    let scale = |hz: f64| match config.weighting {
        FilterWeighting::Warping => config.warping_formula.warp(hz),
        FilterWeighting::Linear => hz,
    };
    let (ramp_low, ramp_center, ramp_high) = (scale(low), scale(center), scale(high));

    let weights: Vec<f64> = (start_bin..end_bin)
        .map(|bin| {
            let bin_hz = bin as f64 * frequency_scale;
            if bin_hz >= low && bin_hz < center {
                (scale(bin_hz) - ramp_low) / (ramp_center - ramp_low)
            } else if bin_hz >= center && bin_hz <= high {
                (ramp_high - scale(bin_hz)) / (ramp_high - ramp_center)
            } else {
                0.0
            }
        })
        .collect();

    if !weights.iter().any(|&w| w > 0.0) {
        return None;
    }

    Some(TriangularFilter {
        start_bin,
        center_bin: frequency_to_bin(center, frequency_scale).min(spectrum_size - 1),
        end_bin,
        weights,
        degenerate: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::types::WarpingFormula;

    fn bank(config: MfccConfig) -> FilterBank {
        FilterBank::new(&config).unwrap()
    }

    #[test]
    fn test_band_frequencies_are_evenly_warped() {
        for formula in [WarpingFormula::SlaneyMel, WarpingFormula::HtkMel] {
            let config = MfccConfig::new()
                .with_warping(formula)
                .with_frequency_range(100.0, 8000.0);
            let bank = bank(config);
            let freqs = bank.band_frequencies();

            assert_eq!(freqs.len(), config.number_bands + 2);
            assert!((freqs[0] - 100.0).abs() < 1e-6);
            assert!((freqs[freqs.len() - 1] - 8000.0).abs() < 1e-6);

            let expected_step =
                (formula.warp(8000.0) - formula.warp(100.0)) / (config.number_bands + 1) as f64;
            for pair in freqs.windows(2) {
                let step = formula.warp(pair[1]) - formula.warp(pair[0]);
                assert!((step - expected_step).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_default_bank_geometry() {
        let bank = bank(MfccConfig::default());
        assert_eq!(bank.len(), 40);
        assert_eq!(bank.spectrum_size(), 1025);
        assert_eq!(bank.degenerate_count(), 0);

        let mut previous_center = 0;
        for filter in bank.filters() {
            assert!(filter.start_bin() <= filter.center_bin());
            assert!(filter.center_bin() < filter.end_bin());
            assert!(filter.end_bin() <= 1025);
            assert_eq!(filter.weights().len(), filter.end_bin() - filter.start_bin());
            assert!(filter.center_bin() >= previous_center);
            previous_center = filter.center_bin();
        }

        // 11 kHz sits halfway up a 1025-bin spectrum at 44.1 kHz
        let last = &bank.filters()[39];
        assert_eq!(last.end_bin(), 511);
    }

    #[test]
    fn test_unit_sum_normalization() {
        let bank = bank(MfccConfig::default());
        for filter in bank.filters() {
            let sum: f64 = filter.weights().iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "filter sums to {sum}");
        }
    }

    #[test]
    fn test_unit_max_matches_unnormalized_triangles() {
        let unit_max = bank(MfccConfig::new().with_normalization(FilterNormalization::UnitMax));
        let none = bank(MfccConfig::new().with_normalization(FilterNormalization::None));
        assert_eq!(unit_max.filters(), none.filters());

        for filter in unit_max.filters() {
            let peak = filter.weights().iter().cloned().fold(0.0, f64::max);
            assert!(peak <= 1.0 && peak > 0.5, "peak {peak}");
            assert!(filter.weights().iter().all(|&w| (0.0..=1.0).contains(&w)));
        }
    }

    #[test]
    fn test_weighting_domains_differ() {
        let base = MfccConfig::new().with_normalization(FilterNormalization::None);
        let warped = bank(base.with_weighting(FilterWeighting::Warping));
        let linear = bank(base.with_weighting(FilterWeighting::Linear));

        // Same support, different ramps
        let (w, l) = (&warped.filters()[30], &linear.filters()[30]);
        assert_eq!(w.start_bin(), l.start_bin());
        assert_eq!(w.end_bin(), l.end_bin());
        assert_ne!(w.weights(), l.weights());
    }

    #[test]
    fn test_coarse_spectrum_degenerates_to_deltas() {
        let config = MfccConfig::new().with_input_size(8);
        let bank = bank(config);
        assert_eq!(bank.len(), 40);
        assert!(bank.degenerate_count() > 0);

        for filter in bank.filters().iter().filter(|f| f.is_degenerate()) {
            assert_eq!(filter.weights(), &[1.0]);
            assert_eq!(filter.start_bin(), filter.center_bin());
            assert!(filter.center_bin() < 8);
        }

        let bands = bank.apply(&[1.0; 8]).unwrap();
        assert_eq!(bands.len(), 40);
        assert!(bands.iter().all(|b| b.is_finite() && *b >= 0.0));
    }

    #[test]
    fn test_apply_power_and_magnitude() {
        let base = MfccConfig::new().with_input_size(513);
        let power = bank(base.with_spectrum_type(SpectrumType::Power));
        let magnitude = bank(base.with_spectrum_type(SpectrumType::Magnitude));

        let spectrum = vec![2.0; 513];
        let power_bands = power.apply(&spectrum).unwrap();
        let magnitude_bands = magnitude.apply(&spectrum).unwrap();

        for (p, m) in power_bands.iter().zip(magnitude_bands.iter()) {
            assert!((p - 2.0 * m).abs() < 1e-12);
        }

        // Unit-sum filters over a constant magnitude return the constant
        for m in magnitude_bands.iter() {
            assert!((m - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_apply_rejects_wrong_length() {
        let bank = bank(MfccConfig::default());
        let err = bank.apply(&[0.0; 512]).unwrap_err();
        assert!(err.is_compute());
    }

    #[test]
    fn test_with_spectrum_size() {
        let config = MfccConfig::default();
        let bank = FilterBank::with_spectrum_size(&config, 257).unwrap();
        assert_eq!(bank.spectrum_size(), 257);
        assert_eq!(bank.band_frequencies(), FilterBank::new(&config).unwrap().band_frequencies());

        assert!(FilterBank::with_spectrum_size(&config, 1).is_err());
        assert!(FilterBank::new(&config.with_bands(1)).is_err());
    }

    #[test]
    fn test_dense_matches_sparse() {
        let bank = bank(MfccConfig::new().with_input_size(257));
        let dense = bank.to_dense();
        assert_eq!(dense.dim(), (40, 257));

        for (row, filter) in dense.outer_iter().zip(bank.filters()) {
            for bin in 0..257 {
                assert_eq!(row[bin], filter.weight(bin));
            }
        }
        assert_eq!(bank.filters()[0].weight(10_000), 0.0);
    }
}
