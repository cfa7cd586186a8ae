//! Error types for grid construction, queries and point loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::cell_key::CellKey;

/// Errors produced by the binning engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A construction or query parameter is out of its valid range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A per-cell query named a key that holds no points.
    #[error("no points are binned into cell {key}")]
    KeyNotFound {
        /// The requested key.
        key: CellKey,
    },

    /// An input point has a NaN or infinite component.
    #[error("point #{index} has a non-finite coordinate or value")]
    NonFinitePoint {
        /// Position of the point in the input sequence.
        index: usize,
    },
}

impl GridError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        GridError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Errors produced while reading point records.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("failed to read points from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record is not three comma separated floats.
    #[error("can't parse `{line}` as a point: {message}")]
    Parse { line: String, message: String },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, GridError>;
