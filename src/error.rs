//! Error types for wave-activity flux computation.
//!
//! Grid and shape problems are fatal and detected before any arithmetic
//! runs. Singular cells (poles, the equator, calm wind) are not errors of
//! the kernel: they are localized in a [`SingularMask`](crate::flux::SingularMask)
//! and only become [`WafError::SingularCoefficient`] when a caller asks for a
//! fully regular result.

use thiserror::Error;

#[cfg(feature = "netcdf")]
use crate::io::NetCDFError;

/// Which coordinate axis a grid error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridAxis {
    Longitude,
    Latitude,
}

impl std::fmt::Display for GridAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridAxis::Longitude => write!(f, "longitude"),
            GridAxis::Latitude => write!(f, "latitude"),
        }
    }
}

/// Errors produced by the flux pipeline.
#[derive(Debug, Error)]
pub enum WafError {
    /// Coordinate axis is empty, too short, non-finite, non-monotonic, or
    /// its length differs from the field dimension it labels.
    #[error("Malformed {axis} axis: {reason}")]
    MalformedGrid { axis: GridAxis, reason: String },

    /// Input fields (or series) disagree in shape with each other.
    #[error("Shape mismatch for {field}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        field: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// The result contains flagged singular cells.
    #[error("Singular flux coefficient at {count} grid cells")]
    SingularCoefficient { count: usize },

    /// Invalid physical configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument (e.g. time index out of range).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing gridded data failed.
    #[cfg(feature = "netcdf")]
    #[error(transparent)]
    NetCDF(#[from] NetCDFError),
}

impl WafError {
    /// Create a malformed-grid error.
    pub fn malformed(axis: GridAxis, reason: impl Into<String>) -> Self {
        Self::MalformedGrid {
            axis,
            reason: reason.into(),
        }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(
        field: impl Into<String>,
        expected: &[usize],
        actual: &[usize],
    ) -> Self {
        Self::ShapeMismatch {
            field: field.into(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WafError>;
