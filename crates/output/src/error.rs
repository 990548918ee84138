//! Error types for remora-output.

use std::fmt;
use std::path::{Path, PathBuf};

/// Broad category of an [`OutputError`].
///
/// Callers branch on the kind rather than on individual variants, e.g. to
/// suggest NetCDF output when a plotfile feature is
/// [`NotImplemented`](ErrorKind::NotImplemented).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file, directory or open resource is missing.
    NotFound,
    /// An unknown variable name.
    Lookup,
    /// A time or grid index outside its axis.
    Range,
    /// An argument the caller can fix, such as an axis name.
    InvalidArgument,
    /// A dataset the readers recognize but cannot decode.
    NotImplemented,
    /// A header or payload that exists but is corrupt.
    Malformed,
    /// A failure inside the NetCDF library or the filesystem.
    Backend,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Range => "range",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::Malformed => "malformed",
            ErrorKind::Backend => "backend",
        })
    }
}

/// Error type for all fallible operations in the remora-output crate.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// A required file or directory does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// A plotfile level directory holds no `Cell_D_*` payload.
    #[error("no Cell_D payload in {}", dir.display())]
    MissingPayload {
        /// Level directory that was searched.
        dir: PathBuf,
    },

    /// No valid snapshot directories were found under a series root.
    #[error("no plotfile snapshots found in {}", path.display())]
    NoSnapshots {
        /// Directory that was scanned.
        path: PathBuf,
    },

    /// The path matched none of the known output layouts.
    #[error("cannot determine output format for {}: tried {}", path.display(), checks.join("; "))]
    UnrecognizedFormat {
        /// Path that was inspected.
        path: PathBuf,
        /// Description of every check that was attempted.
        checks: Vec<String>,
    },

    /// The reader was used after [`close`](crate::OutputReader::close).
    #[error("reader for {} is closed", path.display())]
    Closed {
        /// Path the reader was opened on.
        path: PathBuf,
    },

    /// The requested variable does not exist.
    #[error("variable '{name}' not found in {}", path.display())]
    UnknownVariable {
        /// Name that was requested.
        name: String,
        /// Dataset that was searched.
        path: PathBuf,
    },

    /// A time index outside `[0, len)`.
    #[error("time index {index} out of range [0, {len})")]
    TimeIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of time steps available.
        len: usize,
    },

    /// A grid index outside the selected axis.
    #[error("{axis} index {index} out of range [0, {len})")]
    GridIndexOutOfRange {
        /// Axis name.
        axis: String,
        /// Requested index.
        index: usize,
        /// Axis length.
        len: usize,
    },

    /// An axis name other than `x`, `y` or `z`.
    #[error("invalid axis '{axis}': must be 'x', 'y', or 'z'")]
    InvalidAxis {
        /// Name that was given.
        axis: String,
    },

    /// A valid axis that the field does not have, e.g. `z` on a 2-D field.
    #[error("axis {axis} not present in a {ndim}-dimensional field")]
    MissingAxis {
        /// Axis name.
        axis: String,
        /// Number of dimensions of the field.
        ndim: usize,
    },

    /// Decoding the dataset is not supported.
    #[error("not implemented: {reason}")]
    NotImplemented {
        /// What could not be done, and usually what to use instead.
        reason: String,
    },

    /// The plotfile header does not follow the expected line grammar.
    #[error("malformed header {} at line {line}: {reason}", path.display())]
    MalformedHeader {
        /// Header file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was expected.
        reason: String,
    },

    /// The binary payload is truncated or its sub-header is unreadable.
    #[error("malformed payload {}: {reason}", path.display())]
    MalformedPayload {
        /// Payload file.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },

    /// Filesystem failure other than a missing file.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },
}

impl OutputError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OutputError::FileNotFound { .. }
            | OutputError::MissingPayload { .. }
            | OutputError::NoSnapshots { .. }
            | OutputError::UnrecognizedFormat { .. }
            | OutputError::Closed { .. } => ErrorKind::NotFound,
            OutputError::UnknownVariable { .. } => ErrorKind::Lookup,
            OutputError::TimeIndexOutOfRange { .. } | OutputError::GridIndexOutOfRange { .. } => {
                ErrorKind::Range
            }
            OutputError::InvalidAxis { .. } | OutputError::MissingAxis { .. } => {
                ErrorKind::InvalidArgument
            }
            OutputError::NotImplemented { .. } => ErrorKind::NotImplemented,
            OutputError::MalformedHeader { .. } | OutputError::MalformedPayload { .. } => {
                ErrorKind::Malformed
            }
            OutputError::Io { .. } | OutputError::Netcdf { .. } => ErrorKind::Backend,
        }
    }

    /// Map a filesystem error on `path`, keeping "not found" distinct.
    pub(crate) fn io(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            OutputError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OutputError::Io {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        }
    }
}

impl From<netcdf::Error> for OutputError {
    fn from(e: netcdf::Error) -> Self {
        OutputError::Netcdf {
            reason: e.to_string(),
        }
    }
}
