//! Answers to the questions an interactive generator would ask.
//!
//! Every invocation carries its own [`PromptAnswers`]; nothing is read from
//! global state, so concurrent invocations can answer differently.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// What to do when a file the generator writes already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Keep the existing file and report it as skipped.
    Skip,
    /// Abort before writing anything.
    Fail,
}

impl ConflictPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" | "force" | "y" => Ok(Self::Overwrite),
            "skip" | "n" => Ok(Self::Skip),
            "fail" | "abort" => Ok(Self::Fail),
            other => Err(DomainError::InvalidArguments(format!(
                "unknown conflict policy '{other}' (expected overwrite, skip or fail)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptAnswers {
    #[serde(default)]
    pub conflict: ConflictPolicy,

    /// Extra template variables. They override built-ins such as `NAMESPACE`.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl PromptAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conflict(mut self, policy: ConflictPolicy) -> Self {
        self.conflict = policy;
        self
    }

    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}
