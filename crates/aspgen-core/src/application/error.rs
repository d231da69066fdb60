//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while generating or bootstrapping.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("unknown generator '{name}'")]
    UnknownGenerator { name: String, available: Vec<String> },

    #[error("unknown application kind '{kind}'")]
    UnknownApplicationKind { kind: String },

    /// The generator refused to run: bad arguments or unusable project context.
    #[error("generator '{generator}' precondition failed: {reason}")]
    PreconditionFailed { generator: String, reason: String },

    /// An output file exists and the conflict answer is `Fail`.
    #[error("{path} already exists")]
    FileConflict { path: PathBuf },

    #[error("Template resolution failed: {reason}")]
    TemplateResolution { reason: String },

    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Best-effort cleanup after a failed write did not complete.
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownGenerator { available, .. } => vec![
                format!("Available generators: {}", available.join(", ")),
            ],
            Self::UnknownApplicationKind { .. } => vec![
                "Supported kinds: empty, console, web (mvc), webapi, classlib, unittest".into(),
            ],
            Self::PreconditionFailed { generator, .. } => vec![
                format!("Run 'aspgen list' to see what '{generator}' expects"),
            ],
            Self::FileConflict { path } => vec![
                format!("Remove {} or pass --conflict overwrite", path.display()),
            ],
            Self::TemplateResolution { reason } => vec![
                format!("Resolution failed: {}", reason),
                "Try: aspgen list --templates".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownGenerator { .. }
            | Self::UnknownApplicationKind { .. }
            | Self::TemplateResolution { .. } => ErrorCategory::NotFound,
            Self::PreconditionFailed { .. } => ErrorCategory::Validation,
            Self::FileConflict { .. } | Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::FilesystemError { .. }
            | Self::RollbackFailed { .. }
            | Self::StoreLockError
            | Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
