//! Command handlers. Each one turns parsed arguments into calls on the core
//! services and prints the outcome; none of them holds business logic.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
pub mod verify;

use aspgen_adapters::{InMemoryStore, LocalFilesystem, SimpleRenderer};
use aspgen_core::{application::ScaffoldService, error::AspgenError};
use tracing::debug;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

/// Built-in templates plus any overrides from `--templates-dir`,
/// `templates.local_path` or `ASPGEN_TEMPLATES_DIR`.
pub(crate) fn template_store(global: &GlobalArgs, config: &AppConfig) -> CliResult<InMemoryStore> {
    let store = InMemoryStore::with_builtin()?;
    let configured = global
        .templates_dir
        .as_deref()
        .or(config.templates.local_path.as_deref());

    let overrides = aspgen_adapters::builtin_templates::discover_overrides(configured)
        .map_err(AspgenError::from)?;
    if !overrides.is_empty() {
        let count = store.extend(overrides)?;
        debug!(count, "Template overrides registered");
    }
    Ok(store)
}

pub(crate) fn scaffold_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<ScaffoldService> {
    Ok(ScaffoldService::new(
        Box::new(template_store(global, config)?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    ))
}
