use std::{io, path::PathBuf};

use thiserror::Error;

/// I/O failure while mirroring or pruning a resource tree.
///
/// Any of these aborts the run before a single test is executed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("failed to copy {from:?} to {to:?}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("failed to delete {path:?}")]
    Delete {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    #[error("invalid protected pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        error: regex::Error,
    },
}
