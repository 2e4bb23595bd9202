//! Error types for the attendance core
//!
//! Each failure family gets its own enum so callers can match on the
//! recoverable cases (validation, empty sheet, nothing to remove) and show
//! the `Display` text to the user. The UI layer folds all of them into
//! `anyhow` or a status message.

use std::path::PathBuf;
use thiserror::Error;

/// Rejection reasons for a roster entry candidate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    EmptyField,
    #[error("AG Number must be in the format YYYY-ag-XXXX")]
    BadAgFormat,
}

/// Failures of the durable roster backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roster storage unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored roster is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Failures of sheet editing operations
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("No students to remove")]
    NothingToRemove,
    #[error("Failed to update roster: {0}")]
    Store(#[from] StoreError),
}

/// Failures while producing or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No students to download")]
    EmptySheet,
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to render document")]
    Render(#[from] std::fmt::Error),
}

/// Failures while adding a student to the roster
#[derive(Debug, Error)]
pub enum EnrollError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to save student: {0}")]
    Store(#[from] StoreError),
}
