//! Application layer errors.
//!
//! These errors represent failures in pipeline orchestration, not business
//! logic. Business logic errors are `DomainError` from `crate::domain`.
//!
//! Per-file staging and upload failures are NOT errors of this kind: they
//! are recorded as values inside `StagingReport` / `PublishReport` and the
//! run continues. Only unrecoverable conditions surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The workspace root itself does not exist; staging cannot begin.
    #[error("workspace root not found: {path}")]
    WorkspaceMissing { path: PathBuf },

    /// A local filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// A remote file-store operation failed (directory entry/creation,
    /// upload, delete). Recoverable per-file inside the publisher.
    #[error("Remote error at {path}: {reason}")]
    Remote { path: String, reason: String },

    /// Could not authenticate against or reach the remote host. Fatal to
    /// the publishing phase.
    #[error("Connection to {host} failed: {reason}")]
    ConnectionFailed { host: String, reason: String },

    /// A required credential is absent; reported before any work begins.
    #[error("Missing credential: {field}")]
    MissingCredential { field: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::WorkspaceMissing { path } => vec![
                format!("Workspace root does not exist: {}", path.display()),
                "Run from the site checkout, or pass --workspace <DIR>".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
                "Check available disk space for the staging area".into(),
            ],
            Self::Remote { path, .. } => vec![
                format!("Remote operation failed for: {}", path),
                "Check the remote account's permissions for that path".into(),
            ],
            Self::ConnectionFailed { host, .. } => vec![
                format!("Could not reach or authenticate against: {}", host),
                "Verify FTP_SERVER, FTP_USER and FTP_PASS".into(),
                "Check the host is reachable from this network".into(),
            ],
            Self::MissingCredential { field } => vec![
                format!("Set {} in the environment or in a .env file", field),
                "Dry runs (--dry-run) need no credentials".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::WorkspaceMissing { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. } | Self::Remote { .. } => ErrorCategory::Internal,
            Self::ConnectionFailed { .. } => ErrorCategory::Connection,
            Self::MissingCredential { .. } => ErrorCategory::Configuration,
        }
    }
}
