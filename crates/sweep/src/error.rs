//! Error types for remora-sweep.

use std::path::PathBuf;

use remora_params::ParamError;

/// Error type for all fallible operations in the remora-sweep crate.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// A range axis with a non-positive step, non-finite bounds, or an end
    /// below its start.
    #[error("invalid range for sweep axis '{key}': {reason}")]
    InvalidRange {
        /// Axis key.
        key: String,
        /// What is wrong with the range.
        reason: String,
    },

    /// An axis with neither explicit values nor a complete range.
    #[error("sweep axis '{key}' needs a range (start, end, step) or explicit values")]
    MissingValues {
        /// Axis key.
        key: String,
    },

    /// Two combinations rendered to the same file name.
    #[error("sweep name '{name}' is generated more than once; add more placeholders to the template")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// The output directory could not be created.
    #[error("cannot create output directory {}: {reason}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Writing a generated control file failed.
    #[error(transparent)]
    Params(#[from] ParamError),
}
