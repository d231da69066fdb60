//! Runner configuration.

use serde::{Deserialize, Serialize};

/// How a scenario evaluates its expectations once the generator has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationPolicy {
    /// Check every expectation and report each failure.
    #[default]
    CollectAll,
    /// Stop at the first failed expectation.
    FailFast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub policy: EvaluationPolicy,

    /// Run scenarios on a rayon pool.
    pub parallel: bool,

    /// Worker threads for parallel runs (global pool when unset).
    pub threads: Option<usize>,

    /// Leave workspaces on disk after the run.
    pub keep_workspaces: bool,

    /// Execute pending scenarios instead of skipping them.
    pub include_pending: bool,

    /// Only run scenarios whose name contains this substring.
    pub filter: Option<String>,
}

impl HarnessConfig {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn policy(mut self, policy: EvaluationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn keep_workspaces(mut self, keep: bool) -> Self {
        self.keep_workspaces = keep;
        self
    }

    pub fn include_pending(mut self, include: bool) -> Self {
        self.include_pending = include;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_collect_all() {
        let config = HarnessConfig::default();
        assert_eq!(config.policy, EvaluationPolicy::CollectAll);
        assert!(!config.parallel);
        assert!(!config.include_pending);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: HarnessConfig =
            serde_json::from_str(r#"{"policy": "fail-fast", "parallel": true}"#).unwrap();
        assert_eq!(config.policy, EvaluationPolicy::FailFast);
        assert!(config.parallel);
        assert_eq!(config.threads, None);
    }
}
