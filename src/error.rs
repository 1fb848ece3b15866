//! Error types for armory operations.
//!
//! This module defines [`ArmoryError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Step failures never surface as `ArmoryError` to the caller of a run;
//!   the executor turns them into failed [`StepResult`](crate::steps::StepResult)s
//! - `ArmoryError` reaching `main` means the run could not start at all
//! - Use `anyhow::Error` (via `ArmoryError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for armory operations.
#[derive(Debug, Error)]
pub enum ArmoryError {
    /// An external command could not be launched at all.
    #[error("Failed to launch '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// No home directory or login name to derive the target directory from.
    #[error("Could not determine target directory: {message}")]
    TargetDirUnavailable { message: String },

    /// `--only` or `--skip` named a step that is not in the catalog.
    #[error("Unknown step: {name}")]
    UnknownStep { name: String },

    /// Appending to the shell profile failed.
    #[error("Could not update shell profile {path}: {source}")]
    ProfileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for armory operations.
pub type Result<T> = std::result::Result<T, ArmoryError>;
