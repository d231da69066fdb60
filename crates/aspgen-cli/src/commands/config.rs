//! `aspgen config`: read and write configuration values.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, global::GlobalArgs},
    config::{self as app_config, AppConfig},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.print(&config.get(&key)?)?;
        }

        ConfigCommands::Set { key, value } => {
            let path = target_file(&global);
            app_config::set_in_file(&path, &key, &value)?;
            output.success(&format!("{key} = {value} ({})", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.print(config.to_toml()?.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&target_file(&global).display().to_string())?;
        }
    }

    Ok(())
}

/// `--config` when given, else the file `load` would read.
fn target_file(global: &GlobalArgs) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(AppConfig::active_path)
}
