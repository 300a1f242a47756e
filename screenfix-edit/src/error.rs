//! Error types for screenfix-edit.
//!
//! Usage errors (a screens directory that does not exist or is not a
//! directory) map to exit code 2; runtime errors (I/O failures mid-sweep)
//! map to exit code 1.

use camino::Utf8PathBuf;
use thiserror::Error;

/// The top-level error type for sweep operations.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The configured screens directory does not exist (exit code 2).
    #[error("screens directory not found: {path}")]
    MissingDir { path: Utf8PathBuf },

    /// The configured path exists but is not a directory (exit code 2).
    #[error("not a directory: {path}")]
    NotADirectory { path: Utf8PathBuf },

    /// A runtime/tool error occurred (exit code 1): I/O failures, undecodable
    /// file contents. The sweep stops at the failing file.
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

impl SweepError {
    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SweepError::MissingDir { .. } | SweepError::NotADirectory { .. } => 2,
            SweepError::Runtime(_) => 1,
        }
    }
}

/// Result type alias using SweepError.
pub type SweepResult<T> = Result<T, SweepError>;
