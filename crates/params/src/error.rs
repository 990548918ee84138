//! Error types for remora-params.

use std::path::PathBuf;

/// Error type for all fallible operations in the remora-params crate.
///
/// Parsing control-file text never fails; malformed lines are dropped. The
/// variants here cover file access and schema lookups.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// Returned when a control file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O failure while reading or writing a control file.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a key is not defined in the parameter schema.
    #[error("unknown parameter: '{key}'")]
    UnknownParameter {
        /// Key that was looked up.
        key: String,
    },

    /// Returned when a group name is not defined in the parameter schema.
    #[error("unknown group: '{name}'")]
    UnknownGroup {
        /// Group name that was looked up.
        name: String,
    },
}

impl ParamError {
    /// Build an [`ParamError::Io`] from a `std::io::Error`, keeping the path.
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            return ParamError::FileNotFound { path };
        }
        ParamError::Io {
            path,
            reason: err.to_string(),
        }
    }
}
