//! Run results.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ErrorKind, HarnessError};

/// A single reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&HarnessError> for FailureRecord {
    fn from(err: &HarnessError) -> Self {
        let (path, pattern, description) = match err {
            HarnessError::MissingFile { path } => (Some(path.clone()), None, None),
            HarnessError::ContentMismatch {
                path,
                pattern,
                description,
            }
            | HarnessError::UnexpectedContent {
                path,
                pattern,
                description,
            } => (
                Some(path.clone()),
                Some(pattern.clone()),
                Some(description.clone()),
            ),
            HarnessError::Io { path, .. } => (Some(path.display().to_string()), None, None),
            _ => (None, None, None),
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            path,
            pattern,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed { errors: Vec<FailureRecord> },
    Skipped { reason: String },
}

impl ScenarioStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Skipped { .. } => "SKIP",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub generator: String,
    #[serde(flatten)]
    pub status: ScenarioStatus,
    pub duration_ms: u64,
    /// Set when the workspace was kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<PathBuf>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, ScenarioStatus::Failed { .. })
    }

    pub fn errors(&self) -> &[FailureRecord] {
        match &self.status {
            ScenarioStatus::Failed { errors } => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.label(), self.name)?;
        match &self.status {
            ScenarioStatus::Passed => write!(f, " ({}ms)", self.duration_ms)?,
            ScenarioStatus::Skipped { reason } => write!(f, " ({reason})")?,
            ScenarioStatus::Failed { errors } => {
                for error in errors {
                    write!(f, "\n    {}: {}", error.kind, error.message)?;
                }
            }
        }
        if let Some(path) = &self.workspace {
            write!(f, "\n    workspace: {}", path.display())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn from_reports(reports: &[ScenarioReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            summary.duration_ms += report.duration_ms;
            match report.status {
                ScenarioStatus::Passed => summary.passed += 1,
                ScenarioStatus::Failed { .. } => summary.failed += 1,
                ScenarioStatus::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub scenarios: Vec<ScenarioReport>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, scenarios: Vec<ScenarioReport>) -> Self {
        let summary = RunSummary::from_reports(&scenarios);
        Self {
            run_id,
            started_at,
            scenarios,
            summary,
        }
    }

    /// No scenario failed. Skipped scenarios do not count against the run.
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| s.failed())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scenario in &self.scenarios {
            writeln!(f, "{scenario}")?;
        }
        let s = &self.summary;
        write!(
            f,
            "\n{} scenarios: {} passed, {} failed, {} skipped ({}ms)",
            s.total, s.passed, s.failed, s.skipped, s.duration_ms
        )
    }
}
