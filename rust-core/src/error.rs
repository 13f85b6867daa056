//! Error type shared by the signal model, spectral engine and file plumbing

use thiserror::Error;

/// Coarse classification of a [`WorkbenchError`]
///
/// The interactive layer switches on this to decide how a failure is
/// reported (bad user input vs. bad file vs. programming error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong value type handed to a setter
    Type,
    /// Right type, invalid value
    Value,
    /// Window name not present in the registry
    UnknownWindow,
    /// Empty signal, zero sample spacing or non-finite numeric result
    InvalidInput,
    /// Bad index into a signal store
    OutOfRange,
    /// Structurally malformed source file
    Ingestion,
    /// File system failure
    Io,
    /// Plot image could not be produced
    Render,
}

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Unsupported type for {field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unknown window function: {0}")]
    UnknownWindow(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index {index} out of range for store of {len} signals")]
    OutOfRange { index: usize, len: usize },

    #[error("Malformed input at line {line}: {reason}")]
    Ingestion { line: usize, reason: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render plot: {0}")]
    Render(String),
}

impl WorkbenchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkbenchError::InvalidType { .. } => ErrorKind::Type,
            WorkbenchError::InvalidValue { .. } => ErrorKind::Value,
            WorkbenchError::UnknownWindow(_) => ErrorKind::UnknownWindow,
            WorkbenchError::InvalidInput(_) => ErrorKind::InvalidInput,
            WorkbenchError::OutOfRange { .. } => ErrorKind::OutOfRange,
            WorkbenchError::Ingestion { .. } | WorkbenchError::UnsupportedFormat(_) => {
                ErrorKind::Ingestion
            }
            WorkbenchError::Io(_) => ErrorKind::Io,
            WorkbenchError::Render(_) => ErrorKind::Render,
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        WorkbenchError::InvalidInput(reason.into())
    }

    pub(crate) fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        WorkbenchError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "render")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for WorkbenchError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        WorkbenchError::Render(format!("{value:?}"))
    }
}

#[cfg(feature = "render")]
impl From<image::ImageError> for WorkbenchError {
    fn from(value: image::ImageError) -> Self {
        WorkbenchError::Render(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;
