//! Run-level errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal conditions that abort a run.
///
/// Failing to write a single script is not one of them; see
/// [`crate::runner::Summary::warnings`].
#[derive(Debug, Error)]
pub enum SlurmifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read input file after {produced} script(s): {source}")]
    ReadInput {
        produced: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for run-level operations.
pub type Result<T> = std::result::Result<T, SlurmifyError>;
