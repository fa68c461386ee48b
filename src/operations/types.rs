//! Supporting types and enums for MFCC extraction.
//!
//! This module contains the extractor configuration and the closed set of
//! options it is made of. Each option is a plain enum dispatched to a pure
//! function; none of them carry state.

use std::fmt;
use std::str::FromStr;

use crate::utils::audio_math::{
    amplitude_to_db, hz_to_mel, hz_to_mel_slaney, mel_to_hz, mel_to_hz_slaney, natural_log,
    power_to_db,
};
use crate::{MfccError, MfccResult};

/// Hz to perceptual-scale mapping used to place the filters.
///
/// The two conventions are numerically far apart; swapping one for the other
/// changes extracted coefficients by tens of percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum WarpingFormula {
    /// Slaney's Auditory Toolbox scale: linear below 1 kHz, logarithmic above.
    #[default]
    #[cfg_attr(feature = "serialization", serde(rename = "slaneyMel"))]
    SlaneyMel,
    /// HTK scale: `2595 * log10(1 + f / 700)` everywhere.
    #[cfg_attr(feature = "serialization", serde(rename = "htkMel"))]
    HtkMel,
}

impl WarpingFormula {
    /// Maps a frequency in Hz onto the warped scale.
    pub fn warp(self, freq_hz: f64) -> f64 {
        match self {
            WarpingFormula::SlaneyMel => hz_to_mel_slaney(freq_hz),
            WarpingFormula::HtkMel => hz_to_mel(freq_hz),
        }
    }

    /// Maps a warped value back to Hz. Inverse of [`warp`](Self::warp).
    pub fn unwarp(self, mel: f64) -> f64 {
        match self {
            WarpingFormula::SlaneyMel => mel_to_hz_slaney(mel),
            WarpingFormula::HtkMel => mel_to_hz(mel),
        }
    }

    /// Conventional parameter name of the formula.
    pub const fn as_str(&self) -> &'static str {
        match self {
            WarpingFormula::SlaneyMel => "slaneyMel",
            WarpingFormula::HtkMel => "htkMel",
        }
    }
}

/// What the values of an input spectrum represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SpectrumType {
    /// Values are magnitudes and are squared before filtering.
    #[default]
    Power,
    /// Values are used as they are.
    Magnitude,
}

impl SpectrumType {
    /// The quantity a filter integrates for one spectrum bin.
    #[inline]
    pub fn bin_value(self, value: f64) -> f64 {
        match self {
            SpectrumType::Power => value * value,
            SpectrumType::Magnitude => value,
        }
    }

    /// Conventional parameter name of the spectrum type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SpectrumType::Power => "power",
            SpectrumType::Magnitude => "magnitude",
        }
    }
}

/// Scaling applied to each filter's weights when the bank is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FilterNormalization {
    /// Weights of each filter sum to one.
    #[default]
    UnitSum,
    /// Peak weight of each filter is one. Triangles are built that way, so
    /// this leaves the weights as they are.
    UnitMax,
    /// No scaling.
    None,
}

impl FilterNormalization {
    /// Conventional parameter name of the normalization.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilterNormalization::UnitSum => "unit_sum",
            FilterNormalization::UnitMax => "unit_max",
            FilterNormalization::None => "none",
        }
    }
}

/// Domain in which the triangle ramps are linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FilterWeighting {
    /// Ramps are linear on the warped (mel) scale.
    #[default]
    Warping,
    /// Ramps are linear in Hz.
    Linear,
}

impl FilterWeighting {
    /// Conventional parameter name of the weighting.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilterWeighting::Warping => "warping",
            FilterWeighting::Linear => "linear",
        }
    }
}

/// Discrete cosine transform variant used to decorrelate the log bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum DctType {
    /// Orthonormal DCT-II (`1/sqrt(N)` scale on the first row).
    #[default]
    TypeII,
    /// HTK-style DCT with a uniform `sqrt(2/N)` scale.
    TypeIII,
}

impl TryFrom<u8> for DctType {
    type Error = MfccError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(DctType::TypeII),
            3 => Ok(DctType::TypeIII),
            other => Err(MfccError::configuration(
                "dctType",
                format!("must be 2 or 3, got {other}"),
            )),
        }
    }
}

impl From<DctType> for u8 {
    fn from(value: DctType) -> Self {
        match value {
            DctType::TypeII => 2,
            DctType::TypeIII => 3,
        }
    }
}

/// Compression applied to band energies before the DCT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LogType {
    /// Amplitude to decibels, `20 * log10(max(x, floor))`.
    #[default]
    DbAmp,
    /// Power to decibels, `10 * log10(max(x, floor))`.
    DbPow,
    /// Natural logarithm, `ln(max(x, floor))`.
    #[cfg_attr(feature = "serialization", serde(alias = "log"))]
    Natural,
    /// No compression.
    None,
}

impl LogType {
    /// Compresses one band energy. `floor` keeps silence finite.
    #[inline]
    pub fn compress(self, value: f64, floor: f64) -> f64 {
        match self {
            LogType::DbAmp => amplitude_to_db(value, floor),
            LogType::DbPow => power_to_db(value, floor),
            LogType::Natural => natural_log(value, floor),
            LogType::None => value,
        }
    }

    /// Conventional parameter name of the compression.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogType::DbAmp => "dbamp",
            LogType::DbPow => "dbpow",
            LogType::Natural => "natural",
            LogType::None => "none",
        }
    }
}

macro_rules! impl_parameter_name {
    ($ty:ty, $parameter:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MfccError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|candidate| candidate.as_str() == s)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = [$($variant),+].iter().map(|v| v.as_str()).collect();
                        MfccError::configuration(
                            $parameter,
                            format!("'{s}' is not one of {{{}}}", allowed.join(",")),
                        )
                    })
            }
        }
    };
}

impl_parameter_name!(
    WarpingFormula,
    "warpingFormula",
    [WarpingFormula::SlaneyMel, WarpingFormula::HtkMel]
);
impl_parameter_name!(
    SpectrumType,
    "spectrumType",
    [SpectrumType::Power, SpectrumType::Magnitude]
);
impl_parameter_name!(
    FilterNormalization,
    "normalize",
    [
        FilterNormalization::UnitSum,
        FilterNormalization::UnitMax,
        FilterNormalization::None
    ]
);
impl_parameter_name!(
    FilterWeighting,
    "weighting",
    [FilterWeighting::Warping, FilterWeighting::Linear]
);
impl_parameter_name!(
    LogType,
    "logType",
    [LogType::DbAmp, LogType::DbPow, LogType::Natural, LogType::None]
);

/// Configuration for MFCC extraction.
///
/// Describes the expected spectrum, the filter bank laid over it, the log
/// compression and the DCT. A configuration is checked with
/// [`validate`](Self::validate) before an extractor is built from it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct MfccConfig {
    /// Number of bins of the input spectrum (`frame_size / 2 + 1`)
    pub input_size: usize,
    /// Sample rate of the analysed signal in Hz
    pub sample_rate: f64,
    /// Number of mel bands (at least 2)
    pub number_bands: usize,
    /// Number of cepstral coefficients to output (1..=number_bands)
    pub number_coefficients: usize,
    /// Lower edge of the first filter in Hz
    pub low_frequency_bound: f64,
    /// Upper edge of the last filter in Hz (at most Nyquist)
    pub high_frequency_bound: f64,
    /// Mel scale convention
    pub warping_formula: WarpingFormula,
    /// Whether the input holds magnitudes to be squared or values to use as is
    pub spectrum_type: SpectrumType,
    /// Per-filter weight scaling
    #[cfg_attr(feature = "serialization", serde(rename = "normalize"))]
    pub normalization: FilterNormalization,
    /// Domain in which the triangle ramps are linear
    pub weighting: FilterWeighting,
    /// DCT variant
    pub dct_type: DctType,
    /// Compression applied to the bands before the DCT
    pub log_type: LogType,
    /// Cepstral lifter length, 0 disables liftering
    pub liftering: usize,
    /// Floor applied before taking logarithms
    pub silence_threshold: f64,
}

impl MfccConfig {
    /// Create a new MFCC configuration with default settings.
    ///
    /// - 1025 spectrum bins at 44.1 kHz
    /// - 40 Slaney mel bands between 0 and 11 kHz
    /// - 13 coefficients from a DCT-II
    /// - power spectrum, unit-sum filters, amplitude decibels
    pub const fn new() -> Self {
        Self {
            input_size: 1025,
            sample_rate: 44100.0,
            number_bands: 40,
            number_coefficients: 13,
            low_frequency_bound: 0.0,
            high_frequency_bound: 11000.0,
            warping_formula: WarpingFormula::SlaneyMel,
            spectrum_type: SpectrumType::Power,
            normalization: FilterNormalization::UnitSum,
            weighting: FilterWeighting::Warping,
            dct_type: DctType::TypeII,
            log_type: LogType::DbAmp,
            liftering: 0,
            silence_threshold: 1e-10,
        }
    }

    /// Create a configuration that reproduces HTK-style MFCCs.
    ///
    /// Magnitude spectrum, 26 HTK mel bands up to 8 kHz with unit-max
    /// filters, power decibels and 20 coefficients from the HTK DCT.
    pub const fn htk() -> Self {
        Self {
            spectrum_type: SpectrumType::Magnitude,
            warping_formula: WarpingFormula::HtkMel,
            high_frequency_bound: 8000.0,
            number_bands: 26,
            number_coefficients: 20,
            normalization: FilterNormalization::UnitMax,
            dct_type: DctType::TypeIII,
            log_type: LogType::DbPow,
            ..Self::new()
        }
    }

    /// Set the number of spectrum bins.
    pub const fn with_input_size(mut self, input_size: usize) -> Self {
        self.input_size = input_size;
        self
    }

    /// Set the sample rate in Hz.
    pub const fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the number of mel bands.
    pub const fn with_bands(mut self, number_bands: usize) -> Self {
        self.number_bands = number_bands;
        self
    }

    /// Set the number of cepstral coefficients.
    pub const fn with_coefficients(mut self, number_coefficients: usize) -> Self {
        self.number_coefficients = number_coefficients;
        self
    }

    /// Set the frequency range covered by the filter bank.
    ///
    /// # Arguments
    /// * `low` - Lower edge of the first filter in Hz
    /// * `high` - Upper edge of the last filter in Hz
    pub const fn with_frequency_range(mut self, low: f64, high: f64) -> Self {
        self.low_frequency_bound = low;
        self.high_frequency_bound = high;
        self
    }

    /// Set the mel scale convention.
    pub const fn with_warping(mut self, warping_formula: WarpingFormula) -> Self {
        self.warping_formula = warping_formula;
        self
    }

    /// Set the spectrum type.
    pub const fn with_spectrum_type(mut self, spectrum_type: SpectrumType) -> Self {
        self.spectrum_type = spectrum_type;
        self
    }

    /// Set the filter normalization.
    pub const fn with_normalization(mut self, normalization: FilterNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the triangle weighting domain.
    pub const fn with_weighting(mut self, weighting: FilterWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Set the DCT variant.
    pub const fn with_dct_type(mut self, dct_type: DctType) -> Self {
        self.dct_type = dct_type;
        self
    }

    /// Set the log compression.
    pub const fn with_log_type(mut self, log_type: LogType) -> Self {
        self.log_type = log_type;
        self
    }

    /// Set the cepstral lifter length (0 disables it).
    pub const fn with_liftering(mut self, liftering: usize) -> Self {
        self.liftering = liftering;
        self
    }

    /// Set the floor applied before taking logarithms.
    pub const fn with_silence_threshold(mut self, silence_threshold: f64) -> Self {
        self.silence_threshold = silence_threshold;
        self
    }

    /// Nyquist frequency of the configured sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Validate the configuration parameters.
    ///
    /// Spectrum geometry is not checked against the number of
    /// bands: filters that end up narrower than a bin degrade to single-bin
    /// deltas instead (see [`FilterBank`](crate::FilterBank)).
    ///
    /// # Errors
    /// Returns [`MfccError::Configuration`] naming the first offending parameter.
    pub fn validate(&self) -> MfccResult<()> {
        if self.input_size < 2 {
            return Err(MfccError::configuration(
                "inputSize",
                format!("must be at least 2, got {}", self.input_size),
            ));
        }

        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(MfccError::configuration(
                "sampleRate",
                format!("must be a positive finite frequency, got {}", self.sample_rate),
            ));
        }

        if self.number_bands < 2 {
            return Err(MfccError::configuration(
                "numberBands",
                format!("must be at least 2, got {}", self.number_bands),
            ));
        }

        if self.number_coefficients < 1 {
            return Err(MfccError::configuration(
                "numberCoefficients",
                "must be at least 1",
            ));
        }

        if self.number_coefficients > self.number_bands {
            return Err(MfccError::configuration(
                "numberCoefficients",
                format!(
                    "cannot exceed numberBands ({}), got {}",
                    self.number_bands, self.number_coefficients
                ),
            ));
        }

        if !self.low_frequency_bound.is_finite() || self.low_frequency_bound < 0.0 {
            return Err(MfccError::configuration(
                "lowFrequencyBound",
                format!(
                    "must be a non-negative frequency, got {}",
                    self.low_frequency_bound
                ),
            ));
        }

        if !self.high_frequency_bound.is_finite() {
            return Err(MfccError::configuration(
                "highFrequencyBound",
                format!("must be finite, got {}", self.high_frequency_bound),
            ));
        }

        if self.low_frequency_bound >= self.high_frequency_bound {
            return Err(MfccError::configuration(
                "lowFrequencyBound",
                format!(
                    "must be below highFrequencyBound ({} >= {})",
                    self.low_frequency_bound, self.high_frequency_bound
                ),
            ));
        }

        let nyquist = self.nyquist();
        if self.high_frequency_bound > nyquist {
            return Err(MfccError::configuration(
                "highFrequencyBound",
                format!(
                    "cannot exceed the Nyquist frequency ({} > {})",
                    self.high_frequency_bound, nyquist
                ),
            ));
        }

        if !self.silence_threshold.is_finite() || self.silence_threshold <= 0.0 {
            return Err(MfccError::configuration(
                "silenceThreshold",
                format!("must be a positive finite value, got {}", self.silence_threshold),
            ));
        }

        Ok(())
    }
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self::new()
    }
}
