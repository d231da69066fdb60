// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (scenario reports keep them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("unknown generator '{name}'")]
    UnknownGenerator { name: String },

    #[error("unknown application kind '{kind}'")]
    UnknownApplicationKind { kind: String },

    // ========================================================================
    // Argument Errors
    // ========================================================================
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("generator '{generator}' requires a name argument")]
    MissingName { generator: String },

    #[error("'{value}' is not a valid identifier: {reason}")]
    InvalidIdentifier { value: String, reason: String },

    // ========================================================================
    // Project Context Errors
    // ========================================================================
    #[error("project descriptor is not valid: {0}")]
    InvalidProjectDescriptor(String),

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("No template registered for {0}")]
    NoMatchingTemplate(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownGenerator { .. } => vec![
                "Run 'aspgen list' to see the available generators".into(),
            ],
            Self::UnknownApplicationKind { .. } => vec![
                "Supported kinds: empty, console, web (mvc), webapi, classlib, unittest".into(),
            ],
            Self::MissingName { generator } => vec![format!(
                "Pass a name, e.g. 'aspgen generate {generator} MyName'"
            )],
            Self::InvalidIdentifier { .. } => vec![
                "Names must start with a letter or '_' and contain only letters, digits, '_' or '.'"
                    .into(),
            ],
            Self::InvalidProjectDescriptor(_) => vec![
                "Fix or remove project.json in the working directory".into(),
            ],
            Self::NoMatchingTemplate(_) => vec![
                "Check ASPGEN_TEMPLATES_DIR for a broken override".into(),
                "Try: aspgen list --templates".into(),
            ],
            Self::EmptyTemplate { template_id } => vec![
                format!("Template '{}' is corrupted", template_id),
                "Please report this issue or use a different template".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArguments(_)
            | Self::MissingName { .. }
            | Self::InvalidIdentifier { .. }
            | Self::InvalidProjectDescriptor(_) => ErrorCategory::Validation,
            Self::UnknownGenerator { .. }
            | Self::UnknownApplicationKind { .. }
            | Self::NoMatchingTemplate(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Internal,
}
