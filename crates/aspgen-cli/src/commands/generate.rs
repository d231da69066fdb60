//! `aspgen generate`: run one sub-generator in a working directory.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use aspgen_core::{
    application::{GenerationReport, GenerationRequest},
    domain::PromptAnswers,
};

use crate::{
    cli::{GenerateArgs, global::GlobalArgs},
    commands::scaffold_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(generator = %args.generator))]
pub fn execute(
    args: GenerateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = args.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    let answers = answers(&args, &config);
    debug!(conflict = %answers.conflict, variables = answers.variables.len(), "Answers resolved");

    let service = scaffold_service(&global, &config)?;
    let request = GenerationRequest::new(&args.generator, &cwd)
        .with_args(args.args.iter().cloned())
        .with_answers(answers);
    let report = service.generate(&request)?;

    if output.is_json() {
        return output.json(&serde_json::json!({
            "generator": report.generator.as_str(),
            "namespace": report.namespace,
            "written": relative_all(&report.written, &cwd),
            "skipped": relative_all(&report.skipped, &cwd),
        }));
    }

    print_report(&report, &cwd, &output)
}

/// Config defaults overlaid with `--conflict` and `--var`.
fn answers(args: &GenerateArgs, config: &AppConfig) -> PromptAnswers {
    let mut answers = PromptAnswers::default().conflict(
        args.conflict
            .map(Into::into)
            .unwrap_or(config.defaults.conflict),
    );
    for (key, value) in &config.defaults.variables {
        answers = answers.variable(key.as_str(), value.as_str());
    }
    for (key, value) in &args.variables {
        answers = answers.variable(key.as_str(), value.as_str());
    }
    answers
}

fn print_report(report: &GenerationReport, cwd: &Path, output: &OutputManager) -> CliResult<()> {
    for path in &report.written {
        output.success(&format!("create {}", relative(path, cwd)))?;
    }
    for path in &report.skipped {
        output.warning(&format!("skip   {}", relative(path, cwd)))?;
    }
    if report.written.is_empty() && report.skipped.is_empty() {
        output.info("Nothing to do")?;
    }
    Ok(())
}

fn relative(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn relative_all(paths: &[PathBuf], cwd: &Path) -> Vec<String> {
    paths.iter().map(|p| relative(p, cwd)).collect()
}
