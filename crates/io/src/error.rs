//! Error types for gqmdes-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the gqmdes-io crate.
///
/// Covers missing archive files, NetCDF failures, time-axis decoding
/// problems and data-model mismatches met when reading or writing basin
/// series.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// An archive file is absent. For a forecast this means the upstream
    /// run for the basin has not been produced yet.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// The NetCDF library failed to open, read or write a file.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Message from the netcdf crate.
        reason: String,
    },

    /// A forecast window could not be built.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Message from gqmdes-calendar.
        reason: String,
    },

    /// The requested variable is not in the file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// A series or dimension length does not match the forecast window.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// The time axis cannot be decoded or lacks a required date.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Wraps a filesystem error (e.g. creating output directories).
    #[error("io error: {reason}")]
    Io {
        /// Description of the underlying I/O failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<gqmdes_calendar::CalendarError> for IoError {
    fn from(e: gqmdes_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io {
            reason: e.to_string(),
        }
    }
}
