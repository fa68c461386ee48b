//! Precomputed discrete cosine transform tables.
//!
//! The cepstrum is the DCT of the log band energies. Only the first
//! `output_size` coefficients are ever needed, so the transform is stored as
//! an `(output_size, input_size)` table and applied as a matrix-vector
//! product:
//!
//! ```text
//! c[i] = Σ_j  s_i * cos(π * i * (j + 0.5) / N) * x[j]
//! ```
//!
//! with `N = input_size` and
//!
//! - [`DctType::TypeII`]: `s_0 = sqrt(1/N)`, `s_i = sqrt(2/N)` (orthonormal)
//! - [`DctType::TypeIII`]: `s_i = sqrt(2/N)` for every row (HTK)

use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1};

use super::types::{DctType, MfccConfig};
use crate::{MfccError, MfccResult};

/// DCT table for one `(input_size, output_size, dct_type)` triple, with
/// optional cepstral liftering applied to its output.
#[derive(Debug, Clone, PartialEq)]
pub struct DctMatrix {
    table: Array2<f64>,
    lifter: Option<Array1<f64>>,
    dct_type: DctType,
}

impl DctMatrix {
    /// Builds the table.
    ///
    /// # Arguments
    /// * `input_size` - Length of the vectors to transform (number of bands)
    /// * `output_size` - Number of coefficients to keep
    /// * `dct_type` - Row scaling convention
    ///
    /// # Errors
    /// Returns a configuration error if either size is zero or if
    /// `output_size > input_size`.
    pub fn new(input_size: usize, output_size: usize, dct_type: DctType) -> MfccResult<Self> {
        if input_size == 0 {
            return Err(MfccError::configuration(
                "numberBands",
                "a DCT needs at least one input",
            ));
        }
        if output_size == 0 {
            return Err(MfccError::configuration(
                "numberCoefficients",
                "a DCT needs at least one output",
            ));
        }
        if output_size > input_size {
            return Err(MfccError::configuration(
                "numberCoefficients",
                format!(
                    "a DCT of {input_size} inputs cannot produce {output_size} coefficients"
                ),
            ));
        }

        let n = input_size as f64;
        let first_row_scale = match dct_type {
            DctType::TypeII => (1.0 / n).sqrt(),
            DctType::TypeIII => (2.0 / n).sqrt(),
        };
        let row_scale = (2.0 / n).sqrt();

        let table = Array2::from_shape_fn((output_size, input_size), |(i, j)| {
            let scale = if i == 0 { first_row_scale } else { row_scale };
            scale * (PI / n * i as f64 * (j as f64 + 0.5)).cos()
        });

        Ok(Self {
            table,
            lifter: None,
            dct_type,
        })
    }

    /// Builds the table described by `config`, including liftering.
    ///
    /// # Errors
    /// Returns a configuration error under the same conditions as [`new`](Self::new).
    pub fn from_config(config: &MfccConfig) -> MfccResult<Self> {
        Ok(Self::new(config.number_bands, config.number_coefficients, config.dct_type)?
            .with_liftering(config.liftering))
    }

    /// Applies a sinusoidal cepstral lifter of length `lifter` to the output:
    /// coefficient `i` is scaled by `1 + (L / 2) * sin(π * i / L)`.
    /// A length of 0 disables liftering.
    pub fn with_liftering(mut self, lifter: usize) -> Self {
        let output_size = self.output_size();
        self.lifter = (lifter > 0).then(|| {
            let l = lifter as f64;
            Array1::from_shape_fn(output_size, |i| {
                1.0 + (l / 2.0) * (PI * i as f64 / l).sin()
            })
        });
        self
    }

    /// Transforms one vector of `input_size` values.
    ///
    /// # Errors
    /// Returns a compute error if `input` has the wrong length.
    pub fn transform(&self, input: &[f64]) -> MfccResult<Array1<f64>> {
        if input.len() != self.input_size() {
            return Err(MfccError::compute(format!(
                "DCT expects {} inputs, got {}",
                self.input_size(),
                input.len()
            )));
        }

        let mut coefficients = self.table.dot(&ArrayView1::from(input));
        if let Some(lifter) = &self.lifter {
            coefficients *= lifter;
        }
        Ok(coefficients)
    }

    /// Number of values the transform consumes.
    pub fn input_size(&self) -> usize {
        self.table.ncols()
    }

    /// Number of coefficients the transform produces.
    pub fn output_size(&self) -> usize {
        self.table.nrows()
    }

    /// Row scaling convention of the table.
    pub const fn dct_type(&self) -> DctType {
        self.dct_type
    }

    /// The `(output_size, input_size)` basis table.
    pub const fn table(&self) -> &Array2<f64> {
        &self.table
    }

    /// Per-coefficient lifter weights, if liftering is enabled.
    pub const fn lifter(&self) -> Option<&Array1<f64>> {
        self.lifter.as_ref()
    }
}
