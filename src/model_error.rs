//! Error handling for the model

use std::error::Error;
use std::fmt;

/// Failures the model can report. The typed API uses fixed-size arrays and matrices, so
/// dimension errors only arise when converting from slices.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidLength { expected: usize, found: usize },
    SingularMassMatrix,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ModelError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ModelError::SingularMassMatrix =>
                write!(f, "Mass matrix is not positive definite, check joint values for NaN"),
        }
    }
}

impl Error for ModelError {}
