//! `aspgen verify`: run the sub-generator conformance suite.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{info, instrument};

use aspgen_harness::{
    EvaluationPolicy, HarnessConfig, RunReport, ScenarioReport, ScenarioRunner, ScenarioStatus,
    catalog,
};

use crate::{
    cli::{
        VerifyArgs,
        global::{GlobalArgs, OutputFormat},
    },
    commands::scaffold_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: VerifyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let registry = catalog::subgenerator_scenarios()?;
    let harness = harness_config(&args, config.harness.clone());

    if args.list {
        return list(&registry, &harness, &output);
    }

    let service = Arc::new(scaffold_service(&global, &config)?);
    let runner = ScenarioRunner::new(service, harness);

    let spinner = spinner(&output);
    let report = runner.run(&registry);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    info!(run_id = %report.run_id, failed = report.summary.failed, "Verification finished");

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_report(&report, &output)?;
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::VerificationFailed {
            failed: report.summary.failed,
            total: report.summary.total,
        })
    }
}

/// Only on an interactive, human-format terminal.
fn spinner(output: &OutputManager) -> Option<ProgressBar> {
    if output.format() != OutputFormat::Human || output.is_quiet() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message("Verifying sub-generators");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// The `[harness]` config section overlaid with command-line flags.
///
/// Flags only switch behaviour on; they never turn off what config enabled.
fn harness_config(args: &VerifyArgs, base: HarnessConfig) -> HarnessConfig {
    let mut config = base;
    if args.parallel {
        config = config.parallel(true);
    }
    if let Some(threads) = args.threads {
        config = config.threads(threads);
    }
    if args.fail_fast {
        config = config.policy(EvaluationPolicy::FailFast);
    }
    if args.include_pending {
        config = config.include_pending(true);
    }
    if args.keep_workspaces {
        config = config.keep_workspaces(true);
    }
    if let Some(filter) = &args.filter {
        config = config.filter(filter.as_str());
    }
    config
}

fn list(
    registry: &aspgen_harness::ScenarioRegistry,
    harness: &HarnessConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let selected: Vec<_> = match &harness.filter {
        Some(needle) => registry.filter(needle).collect(),
        None => registry.iter().collect(),
    };

    if output.is_json() {
        let rows: Vec<_> = selected
            .iter()
            .map(|s| {
                serde_json::json!({
                    "name": s.name(),
                    "generator": s.generator(),
                    "args": s.args(),
                    "pending": s.pending(),
                })
            })
            .collect();
        return output.json(&rows);
    }

    for scenario in &selected {
        match scenario.pending() {
            Some(reason) => output.print(&format!("{} (pending: {reason})", scenario.name()))?,
            None => output.print(scenario.name())?,
        }
    }
    Ok(())
}

fn print_report(report: &RunReport, output: &OutputManager) -> CliResult<()> {
    for scenario in &report.scenarios {
        print_scenario(scenario, output)?;
    }

    let s = &report.summary;
    let summary = format!(
        "{} scenarios: {} passed, {} failed, {} skipped ({}ms)",
        s.total, s.passed, s.failed, s.skipped, s.duration_ms
    );
    output.print("")?;
    if report.is_success() {
        output.success(&summary)?;
    } else {
        output.error(&summary)?;
    }
    Ok(())
}

fn print_scenario(scenario: &ScenarioReport, output: &OutputManager) -> CliResult<()> {
    let label = match (&scenario.status, output.supports_color()) {
        (status, false) => status.label().to_string(),
        (ScenarioStatus::Passed, true) => "PASS".green().bold().to_string(),
        (ScenarioStatus::Failed { .. }, true) => "FAIL".red().bold().to_string(),
        (ScenarioStatus::Skipped { .. }, true) => "SKIP".yellow().to_string(),
    };

    match &scenario.status {
        ScenarioStatus::Passed => {
            output.print(&format!("{label} {} ({}ms)", scenario.name, scenario.duration_ms))?;
        }
        ScenarioStatus::Skipped { reason } => {
            output.print(&format!("{label} {} ({reason})", scenario.name))?;
        }
        ScenarioStatus::Failed { errors } => {
            // Failures stay visible under --quiet.
            output.error(&format!("{label} {}", scenario.name))?;
            for error in errors {
                output.error(&format!("    {}: {}", error.kind, error.message))?;
            }
        }
    }
    if let Some(path) = &scenario.workspace {
        output.info(&format!("    workspace: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> VerifyArgs {
        VerifyArgs {
            parallel: false,
            threads: None,
            fail_fast: false,
            include_pending: false,
            filter: None,
            keep_workspaces: false,
            list: false,
        }
    }

    #[test]
    fn flags_overlay_config() {
        let config = harness_config(
            &VerifyArgs {
                parallel: true,
                threads: Some(2),
                fail_fast: true,
                filter: Some("dockerfile".into()),
                ..args()
            },
            HarnessConfig::default(),
        );
        assert!(config.parallel);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.policy, EvaluationPolicy::FailFast);
        assert_eq!(config.filter.as_deref(), Some("dockerfile"));
        assert!(!config.include_pending);
    }

    #[test]
    fn absent_flags_keep_config() {
        let base = HarnessConfig::default()
            .include_pending(true)
            .keep_workspaces(true);
        assert_eq!(harness_config(&args(), base.clone()), base);
    }
}
