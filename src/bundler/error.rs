//! Error types for the bundling pipeline.
//!
//! All pipeline steps return [`Result`]. Validation errors are reported
//! before any mutation; every other error aborts the pipeline at the point
//! of failure and propagates to the caller.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all bundling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (bad field values, cache path that is not a
    /// directory, unknown minimize profile)
    #[error("configuration error: {0}")]
    Config(String),

    /// A declared resource path does not exist
    #[error("resource '{}' doesn't exist", .0.display())]
    ResourceNotFound(PathBuf),

    /// No runtime image was found in the extracted tree
    #[error("couldn't find a runtime image, see '{}'", .0.display())]
    RuntimeNotFound(PathBuf),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO error with the operation and path that failed
    #[error("{context} ({}): {source}", .path.display())]
    Fs {
        /// What was being attempted
        context: String,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Network failure while fetching a remote runtime
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// Archive read/write errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failure while repacking a filtered archive; the original archive is
    /// only replaced after a successful repack
    #[error("failed to repack '{}': {reason}", .archive.display())]
    Repack {
        /// Archive being rewritten
        archive: PathBuf,
        /// Why the repack failed
        reason: String,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal errors
    #[error("directory walk error: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// Path prefix errors during tree copies
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Extension trait attaching operation and path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`], recording what was being
    /// attempted and on which path.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait attaching a message to empty options and foreign errors.
pub trait Context<T> {
    /// Converts `None` / `Err` into [`Error::GenericError`] with the message.
    fn context(self, message: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(message.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, message: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", message, e)))
    }
}
