//! Error types for the merge pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Usage line shown when no project directory is given.
pub const USAGE: &str = "Usage: go-merge <project_directory>";

/// Every failure is fatal to the run.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No root directory supplied
    #[error("{}", USAGE)]
    Usage,

    /// Directory traversal failed
    #[error("Error walking through directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A source file could not be read
    #[error("Error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output artifact could not be created or written
    #[error("Error writing output file {path}: {source}")]
    Emit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MergeError {
    pub fn emit(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Emit { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
