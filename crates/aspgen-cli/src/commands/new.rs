//! `aspgen new`: scaffold an application into `<dir>/<name>`.

use std::path::PathBuf;

use tracing::{info, instrument};

use aspgen_core::{
    application::TemplateService,
    domain::{ApplicationKind, PromptAnswers, TemplateTarget},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::{scaffold_service, template_store},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(kind = %args.kind, name = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let kind = ApplicationKind::from(args.kind);
    let parent = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = parent.join(&args.name);

    if args.dry_run {
        let templates = TemplateService::new(Box::new(template_store(&global, &config)?));
        let info = templates.for_target(TemplateTarget::Application(kind))?;
        output.info(&format!(
            "Dry run: would create {} application '{}' at {}",
            kind,
            args.name,
            root.display()
        ))?;
        for file in &info.files {
            output.print(&format!("  {file}"))?;
        }
        return Ok(());
    }

    let service = scaffold_service(&global, &config)?;
    let answers = PromptAnswers::default().conflict(config.defaults.conflict);

    output.header(&format!("Creating {kind} application '{}'...", args.name))?;
    let report = service.bootstrap(kind.as_str(), &args.name, &parent, &answers)?;
    info!(root = %report.root.display(), files = report.written.len(), "Application created");

    output.success(&format!(
        "Created '{}' ({} files)",
        args.name,
        report.written.len()
    ))?;
    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.root.display()))?;
        output.print("  aspgen list")?;
    }

    Ok(())
}
