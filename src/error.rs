//! Global error handling for folderdump
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for folderdump operations
#[derive(Error, Debug)]
pub enum FolderDumpError {
    /// Invalid include/exclude regular expression
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Persisted filter file could not be read or parsed
    #[error("Failed to read filter config {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Directory traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for folderdump operations
pub type Result<T> = std::result::Result<T, FolderDumpError>;

/// Creates a FolderDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FolderDumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl FolderDumpError {
    /// Build a `ConfigRead` error from any displayable cause
    pub fn config_read(path: impl AsRef<std::path::Path>, reason: impl std::fmt::Display) -> Self {
        Self::ConfigRead {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}
