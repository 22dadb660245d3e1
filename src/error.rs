//! Error types for driftfield.
//!
//! Only layer construction can fail. Once a [`ParticleField`](crate::ParticleField)
//! exists, every tick is total: numeric edge cases in the projection are
//! absorbed locally and never surface here.

use std::io;
use thiserror::Error;

/// Errors raised while building or loading a layer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The pool must hold at least one particle.
    #[error("particle count must be positive, got {0}")]
    EmptyPool(u32),

    /// A strictly positive quantity was zero, negative or NaN.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A value that must be finite was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A sampling range had `min > max`.
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        /// Name of the offending range.
        field: &'static str,
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },

    /// A probability outside `[0, 1]`.
    #[error("{field} must lie in [0, 1], got {value}")]
    Probability {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Failed to read or write a configuration file.
    #[error("failed to access layer config: {0}")]
    Io(#[from] io::Error),

    /// The configuration file was not valid JSON for a layer.
    #[error("failed to parse layer config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject anything that is not a strictly positive finite number.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_negative_and_nan() {
        assert!(ensure_positive("range_z", 1.0).is_ok());
        assert!(ensure_positive("range_z", 0.0).is_err());
        assert!(ensure_positive("range_z", -3.0).is_err());
        assert!(ensure_positive("range_z", f64::NAN).is_err());
        assert!(ensure_positive("range_z", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ensure_positive("focal_length", -1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "focal_length must be positive and finite, got -1"
        );
    }
}
