use std::path::PathBuf;

use thiserror::Error;

/// Failure evaluating one test file. Always contained to that file's result.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to compile {path:?}: {message}")]
    Compile { path: PathBuf, message: String },

    #[error("failed to run {path:?}: {message}")]
    Runtime { path: PathBuf, message: String },

    #[error("unrecognized outcome from {path:?}: {message}")]
    Outcome { path: PathBuf, message: String },
}
