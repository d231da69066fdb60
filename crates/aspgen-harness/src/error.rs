//! Harness errors.
//!
//! Two layers, with different propagation:
//!
//! - **Invocation** errors (`Io`, `UnknownGenerator`, `GeneratorPrecondition`,
//!   `GenerationFailed`, `Bootstrap`) abort the scenario before any
//!   expectation is evaluated.
//! - **Assertion** errors (`MissingFile`, `ContentMismatch`,
//!   `UnexpectedContent`) are reported per expectation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("I/O error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("unknown generator '{name}'")]
    UnknownGenerator { name: String },

    #[error("generator '{generator}' precondition failed: {reason}")]
    GeneratorPrecondition { generator: String, reason: String },

    /// The generator ran but could not produce its output (template or
    /// rendering failure).
    #[error("generator '{generator}' failed: {reason}")]
    GenerationFailed { generator: String, reason: String },

    #[error("bootstrap of {kind} application '{name}' failed: {reason}")]
    Bootstrap {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("expected file {path} does not exist")]
    MissingFile { path: String },

    #[error("{path} does not match {pattern} ({description})")]
    ContentMismatch {
        path: String,
        pattern: String,
        description: String,
    },

    #[error("{path} unexpectedly matches {pattern} ({description})")]
    UnexpectedContent {
        path: String,
        pattern: String,
        description: String,
    },

    /// A scenario or registry was declared incorrectly.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

impl HarnessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::UnknownGenerator { .. } => ErrorKind::UnknownGenerator,
            Self::GeneratorPrecondition { .. } => ErrorKind::GeneratorPrecondition,
            Self::GenerationFailed { .. } => ErrorKind::GenerationFailed,
            Self::Bootstrap { .. } => ErrorKind::Bootstrap,
            Self::MissingFile { .. } => ErrorKind::MissingFile,
            Self::ContentMismatch { .. } => ErrorKind::ContentMismatch,
            Self::UnexpectedContent { .. } => ErrorKind::UnexpectedContent,
            Self::InvalidScenario(_) => ErrorKind::InvalidScenario,
        }
    }

    /// Whether this is an expectation failure rather than an invocation failure.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::MissingFile { .. } | Self::ContentMismatch { .. } | Self::UnexpectedContent { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

/// Stable error names used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "IOError")]
    Io,
    #[serde(rename = "UnknownGeneratorError")]
    UnknownGenerator,
    #[serde(rename = "GeneratorPreconditionError")]
    GeneratorPrecondition,
    #[serde(rename = "GenerationError")]
    GenerationFailed,
    #[serde(rename = "BootstrapError")]
    Bootstrap,
    #[serde(rename = "MissingFileError")]
    MissingFile,
    #[serde(rename = "ContentMismatchError")]
    ContentMismatch,
    #[serde(rename = "UnexpectedContentError")]
    UnexpectedContent,
    #[serde(rename = "InvalidScenarioError")]
    InvalidScenario,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Io => "IOError",
            Self::UnknownGenerator => "UnknownGeneratorError",
            Self::GeneratorPrecondition => "GeneratorPreconditionError",
            Self::GenerationFailed => "GenerationError",
            Self::Bootstrap => "BootstrapError",
            Self::MissingFile => "MissingFileError",
            Self::ContentMismatch => "ContentMismatchError",
            Self::UnexpectedContent => "UnexpectedContentError",
            Self::InvalidScenario => "InvalidScenarioError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type HarnessResult<T> = Result<T, HarnessError>;
