//! Crate-wide error type.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by simulation and calibration.
///
/// Out-of-range parameter values are deliberately absent: models and
/// transforms accept any number and let the objective penalise nonsense.
#[derive(Debug, Error)]
pub enum Error {
    #[error("length mismatch: {what} has {got} values, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("incomplete transform bundle: missing {}", missing.join(", "))]
    IncompleteTransformBundle { missing: Vec<&'static str> },

    #[error("expected {expected} parameters, got {got}")]
    ParameterCount { expected: usize, got: usize },

    #[error("optimization failed: {0}")]
    Optimizer(String),
}

impl Error {
    /// Check that `got` values were supplied where `expected` are required.
    pub(crate) fn check_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
        if expected != got {
            return Err(Error::LengthMismatch {
                what,
                expected,
                got,
            });
        }
        Ok(())
    }
}
