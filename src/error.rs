//! Error types and result utilities for MFCC extraction.

use thiserror::Error;

/// Convenience type alias for results that may contain MfccError
pub type MfccResult<T> = Result<T, MfccError>;

/// Error types that can occur while configuring or running the extractor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MfccError {
    /// A configuration parameter, or a combination of parameters, is invalid.
    ///
    /// Raised by [`MfccConfig::validate`](crate::MfccConfig::validate) and
    /// everything that builds on it. The extractor that rejected the
    /// configuration keeps whatever state it had before.
    #[error("Invalid configuration: parameter '{parameter}' {reason}")]
    Configuration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The input handed to a compute call cannot be processed.
    ///
    /// No partial output is produced when this is returned.
    #[error("Compute error: {0}")]
    Compute(String),
}

impl MfccError {
    /// Create a configuration error for `parameter`.
    pub fn configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Create a compute error.
    pub fn compute(details: impl Into<String>) -> Self {
        Self::Compute(details.into())
    }

    /// Returns true if this error was raised while configuring.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns true if this error was raised while computing.
    pub const fn is_compute(&self) -> bool {
        matches!(self, Self::Compute(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MfccError::configuration("numberBands", "must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: parameter 'numberBands' must be at least 2, got 1"
        );
        assert!(err.is_configuration());
        assert!(!err.is_compute());

        let err = MfccError::compute("spectrum has 1 bin");
        assert_eq!(err.to_string(), "Compute error: spectrum has 1 bin");
        assert!(err.is_compute());
    }
}
