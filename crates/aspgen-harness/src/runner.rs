//! Scenario execution.
//!
//! Each scenario runs bootstrap, then the generator, then its expectations,
//! inside a workspace nobody else touches. That makes scenarios safe to run
//! on separate threads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use aspgen_core::application::ScaffoldService;
use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::assertions::ArtifactAssertions;
use crate::bootstrap::ApplicationBootstrapper;
use crate::config::{EvaluationPolicy, HarnessConfig};
use crate::error::{HarnessError, HarnessResult};
use crate::invoker::GeneratorInvoker;
use crate::registry::ScenarioRegistry;
use crate::report::{FailureRecord, RunReport, ScenarioReport, ScenarioStatus};
use crate::scenario::Scenario;
use crate::workspace::{TempWorkspace, Workspace};

pub struct ScenarioRunner {
    invoker: GeneratorInvoker,
    bootstrapper: ApplicationBootstrapper,
    config: HarnessConfig,
}

impl ScenarioRunner {
    pub fn new(service: Arc<ScaffoldService>, config: HarnessConfig) -> Self {
        Self {
            invoker: GeneratorInvoker::new(Arc::clone(&service)),
            bootstrapper: ApplicationBootstrapper::new(service),
            config,
        }
    }

    /// Runner over the built-in templates.
    pub fn with_builtin(config: HarnessConfig) -> HarnessResult<Self> {
        let invoker = GeneratorInvoker::with_builtin()?;
        Ok(Self::new(Arc::clone(invoker.service()), config))
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one scenario in a fresh workspace.
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let report = |status: ScenarioStatus, duration_ms: u64, workspace: Option<PathBuf>| {
            ScenarioReport {
                name: scenario.name().to_string(),
                generator: scenario.generator().to_string(),
                status,
                duration_ms,
                workspace,
            }
        };

        if let Some(reason) = scenario.pending().filter(|_| !self.config.include_pending) {
            return report(
                ScenarioStatus::Skipped {
                    reason: reason.to_string(),
                },
                0,
                None,
            );
        }

        let start = Instant::now();
        let workspace = match TempWorkspace::create() {
            Ok(ws) => ws,
            Err(e) => return report(failed(vec![e]), elapsed_ms(start), None),
        };

        let span = info_span!("scenario", name = %scenario.name(), run_id = %workspace.run_id());
        let _guard = span.enter();

        let errors = self.execute(scenario, &workspace);
        let status = if errors.is_empty() {
            info!("Scenario passed");
            ScenarioStatus::Passed
        } else {
            warn!(failures = errors.len(), "Scenario failed");
            failed(errors)
        };

        let kept = self.retain(workspace);
        report(status, elapsed_ms(start), kept)
    }

    /// Run every selected scenario in `registry`, preserving its order in the
    /// report.
    pub fn run(&self, registry: &ScenarioRegistry) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let selected: Vec<&Scenario> = match &self.config.filter {
            Some(needle) => registry.filter(needle).collect(),
            None => registry.iter().collect(),
        };
        info!(%run_id, scenarios = selected.len(), parallel = self.config.parallel, "Run started");

        let reports = if self.config.parallel {
            self.run_parallel(&selected)
        } else {
            selected.iter().map(|s| self.run_scenario(s)).collect()
        };

        let report = RunReport::new(run_id, started_at, reports);
        info!(
            passed = report.summary.passed,
            failed = report.summary.failed,
            skipped = report.summary.skipped,
            "Run finished"
        );
        report
    }

    fn run_parallel(&self, scenarios: &[&Scenario]) -> Vec<ScenarioReport> {
        let run_all = || {
            scenarios
                .par_iter()
                .map(|s| self.run_scenario(s))
                .collect::<Vec<_>>()
        };

        match self.config.threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run_all),
                Err(e) => {
                    warn!(error = %e, "Falling back to the global thread pool");
                    run_all()
                }
            },
            None => run_all(),
        }
    }

    /// Bootstrap, invoke, then check expectations.
    ///
    /// Invocation failures end the scenario before any expectation runs.
    fn execute(&self, scenario: &Scenario, workspace: &Workspace) -> Vec<HarnessError> {
        if let Some(boot) = scenario.bootstrap() {
            if let Err(e) =
                self.bootstrapper
                    .bootstrap_application(&boot.kind, &boot.name, workspace.path())
            {
                return vec![e];
            }
        }

        let cwd = scenario.invocation_dir(workspace.path());
        if let Err(e) = std::fs::create_dir_all(&cwd) {
            return vec![HarnessError::io(cwd, e)];
        }

        if let Err(e) = self.invoker.invoke_with(
            scenario.generator(),
            scenario.args(),
            &cwd,
            scenario.answers(),
        ) {
            return vec![e];
        }

        let assertions = ArtifactAssertions::new(cwd);
        let mut errors = Vec::new();
        for expectation in scenario.expectations() {
            if let Err(e) = expectation.check(&assertions) {
                errors.push(e);
                if self.config.policy == EvaluationPolicy::FailFast {
                    break;
                }
            }
        }
        errors
    }

    fn retain(&self, workspace: Workspace) -> Option<PathBuf> {
        self.config.keep_workspaces.then(|| workspace.keep())
    }
}

fn failed(errors: Vec<HarnessError>) -> ScenarioStatus {
    ScenarioStatus::Failed {
        errors: errors.iter().map(FailureRecord::from).collect(),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertions::Pattern;
    use crate::error::ErrorKind;

    fn runner(config: HarnessConfig) -> ScenarioRunner {
        ScenarioRunner::with_builtin(config).unwrap()
    }

    fn broken_readme() -> Scenario {
        Scenario::builder("broken", "readme")
            .expect_file("README.txt")
            .expect_match("README.md", Pattern::literal("# Nope"), "first")
            .expect_no_regex("README.md", "^# MyNamespace$", "second")
            .build()
            .unwrap()
    }

    #[test]
    fn collect_all_reports_every_failed_expectation() {
        let report = runner(HarnessConfig::default()).run_scenario(&broken_readme());

        let kinds: Vec<_> = report.errors().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                ErrorKind::MissingFile,
                ErrorKind::ContentMismatch,
                ErrorKind::UnexpectedContent
            ]
        );
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let config = HarnessConfig::default().policy(EvaluationPolicy::FailFast);
        let report = runner(config).run_scenario(&broken_readme());
        assert_eq!(report.errors().len(), 1);
    }

    #[test]
    fn invocation_error_skips_assertions() {
        let scenario = Scenario::builder("unknown", "nosuchgenerator")
            .expect_file("anything")
            .build()
            .unwrap();

        let report = runner(HarnessConfig::default()).run_scenario(&scenario);
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.errors()[0].kind, ErrorKind::UnknownGenerator);
    }

    #[test]
    fn pending_is_skipped_unless_included() {
        let scenario = Scenario::builder("pending", "program")
            .expect_file("Program.cs")
            .pending("not yet")
            .build()
            .unwrap();

        let skipped = runner(HarnessConfig::default()).run_scenario(&scenario);
        assert_eq!(
            skipped.status,
            ScenarioStatus::Skipped {
                reason: "not yet".into()
            }
        );

        let included = runner(HarnessConfig::default().include_pending(true)).run_scenario(&scenario);
        assert!(included.passed());
    }

    #[test]
    fn kept_workspace_is_reported() {
        let scenario = Scenario::builder("kept", "program")
            .expect_file("Program.cs")
            .build()
            .unwrap();

        let report = runner(HarnessConfig::default().keep_workspaces(true)).run_scenario(&scenario);
        let path = report.workspace.clone().unwrap();
        assert!(path.join("Program.cs").is_file());
        std::fs::remove_dir_all(path).unwrap();
    }

    #[test]
    fn working_dir_is_created_inside_the_workspace() {
        let scenario = Scenario::builder("nested", "class")
            .args(["Customer"])
            .in_dir("Models")
            .expect_regex("Customer.cs", "^namespace MyNamespace$", "namespace")
            .build()
            .unwrap();

        assert!(runner(HarnessConfig::default()).run_scenario(&scenario).passed());
    }
}
