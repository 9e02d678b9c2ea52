//! Error types for the groundwater solver.
//!
//! All fatal conditions surface as [`GroundwaterError`]. Stability notices for
//! the explicit scheme are not errors; see
//! [`StabilityWarning`](crate::solver::StabilityWarning).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GroundwaterError>;

/// Error type for grid construction, stepping and post-processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroundwaterError {
    /// Invalid grid, timestep, field or boundary input. Raised before any stepping.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unrecognized time-integration method name.
    #[error("Invalid method '{0}': expected \"implicit\" or \"explicit\"")]
    InvalidMethod(String),

    /// The implicit linear system could not be solved.
    #[error("Linear system failed at step {step}: {reason}")]
    LinearSystem { step: usize, reason: String },

    /// Two fields that must share a shape do not.
    #[error("Shape mismatch: expected {expected:?} (ny, nx), got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl GroundwaterError {
    /// Shorthand for a [`GroundwaterError::Configuration`] error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error was raised by input validation (before stepping).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidMethod(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GroundwaterError::config("nx must be >= 2, got 1");
        assert_eq!(err.to_string(), "Configuration error: nx must be >= 2, got 1");

        let err = GroundwaterError::InvalidMethod("crank".into());
        assert!(err.to_string().contains("'crank'"));

        let err = GroundwaterError::LinearSystem {
            step: 3,
            reason: "singular".into(),
        };
        assert_eq!(err.to_string(), "Linear system failed at step 3: singular");

        let err = GroundwaterError::ShapeMismatch {
            expected: (4, 5),
            actual: (5, 4),
        };
        assert!(err.to_string().contains("(4, 5)"));
    }

    #[test]
    fn test_is_configuration() {
        assert!(GroundwaterError::config("x").is_configuration());
        assert!(GroundwaterError::InvalidMethod("x".into()).is_configuration());
        assert!(
            !GroundwaterError::ShapeMismatch {
                expected: (1, 1),
                actual: (2, 2)
            }
            .is_configuration()
        );
    }
}
