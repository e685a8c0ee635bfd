#[cfg(feature = "python")]
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyTypeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::prelude::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Schema or selection problem, detected before any byte is decoded.
    ConfigError(String),
    /// The buffer ends before a fixed section does.
    TruncatedBuffer {
        section: String,
        offset: usize,
        required: usize,
        available: usize,
    },
    /// An assembly field asked for an element the decoded section does not have.
    SelectionOutOfRange {
        field: String,
        section: String,
        index: usize,
        len: usize,
    },
    /// The verifier boundary refused the argument shape.
    VerifierCallError(String),
    InvalidEncoding(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            LayoutError::TruncatedBuffer {
                section,
                offset,
                required,
                available,
            } => write!(
                f,
                "Truncated buffer: section '{}' at offset {} needs {} bytes, only {} available",
                section, offset, required, available
            ),
            LayoutError::SelectionOutOfRange {
                field,
                section,
                index,
                len,
            } => write!(
                f,
                "Selection out of range: field '{}' requests element {} of section '{}' with {} elements",
                field, index, section, len
            ),
            LayoutError::VerifierCallError(msg) => write!(f, "Verifier call failed: {}", msg),
            LayoutError::InvalidEncoding(msg) => write!(f, "Invalid encoding: {}", msg),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(feature = "python")]
impl From<LayoutError> for PyErr {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::ConfigError(msg) => PyValueError::new_err(msg),
            LayoutError::InvalidEncoding(msg) => PyTypeError::new_err(msg),
            LayoutError::SelectionOutOfRange { .. } => PyIndexError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;

pub fn safe_add(a: usize, b: usize) -> LayoutResult<usize> {
    a.checked_add(b).ok_or_else(|| {
        LayoutError::ConfigError(format!("Integer overflow in addition: {} + {}", a, b))
    })
}

pub fn safe_mul(a: usize, b: usize) -> LayoutResult<usize> {
    a.checked_mul(b).ok_or_else(|| {
        LayoutError::ConfigError(format!("Integer overflow in multiplication: {} * {}", a, b))
    })
}
