//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core and harness crates never read it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by each command)
//! 2. `ASPGEN_*` environment variables, `__` between sections
//!    (`ASPGEN_HARNESS__PARALLEL=true`)
//! 3. Config file (`--config`, else `./.aspgen.toml`, else the platform path)
//! 4. Built-in defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aspgen_core::domain::ConflictPolicy;
use aspgen_harness::HarnessConfig;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

pub const ENV_PREFIX: &str = "ASPGEN";
pub const LOCAL_CONFIG_FILE: &str = ".aspgen.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
    pub harness: HarnessConfig,
}

/// Answers applied to every `generate` unless overridden on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub conflict: ConflictPolicy,
    /// Extra template variables, e.g. `NAMESPACE`.
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `template.toml` overrides.
    pub local_path: Option<PathBuf>,
}

impl AppConfig {
    /// Merge defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default())
            .map_err(|e| CliError::config("failed to build default configuration", e))?;

        let mut builder = Config::builder().add_source(defaults);
        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                let path = Self::active_path();
                debug!(path = %path.display(), "Using default config file");
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
            }
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| CliError::config("failed to load configuration", e))
    }

    /// The platform config file, e.g. `~/.config/aspgen/config.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "aspgen", "aspgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// `./.aspgen.toml` when present, else [`Self::config_path`].
    pub fn active_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            local
        } else {
            Self::config_path()
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::config("failed to serialise configuration", e))
    }

    /// Value of a dotted key as it would appear in the file.
    pub fn get(&self, key: &str) -> CliResult<String> {
        let value = toml::Value::try_from(self)
            .map_err(|e| CliError::config("failed to serialise configuration", e))?;
        let mut node = &value;
        for part in key.split('.') {
            node = node.get(part).ok_or_else(|| CliError::UnknownConfigKey {
                key: key.to_string(),
            })?;
        }
        Ok(match node {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Set a dotted key in the TOML file at `path`, creating the file if needed.
///
/// The result must still deserialize into [`AppConfig`].
pub fn set_in_file(path: &Path, key: &str, raw: &str) -> CliResult<()> {
    let mut table: toml::Table = if path.is_file() {
        let text = std::fs::read_to_string(path)?;
        text.parse()
            .map_err(|e| CliError::config(format!("cannot parse {}", path.display()), e))?
    } else {
        toml::Table::new()
    };

    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, sections)) = parts.split_last() else {
        return Err(CliError::UnknownConfigKey { key: key.into() });
    };

    let mut node = &mut table;
    for section in sections {
        let entry = node
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        node = entry.as_table_mut().ok_or_else(|| CliError::UnknownConfigKey {
            key: key.to_string(),
        })?;
    }
    node.insert(last.to_string(), parse_scalar(raw));

    // Reject keys the config does not have and values of the wrong type.
    let merged: AppConfig = toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e| CliError::InvalidInput {
            message: format!("{key} = {raw}"),
            source: Some(Box::new(e)),
        })?;
    merged.get(key)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&table)
        .map_err(|e| CliError::config("failed to serialise configuration", e))?;
    std::fs::write(path, text)?;
    Ok(())
}

fn parse_scalar(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspgen_harness::EvaluationPolicy;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.conflict, ConflictPolicy::Overwrite);
        assert!(!cfg.output.no_color);
        assert!(!cfg.harness.parallel);
    }

    #[test]
    fn explicit_file_is_merged_over_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("aspgen.toml");
        std::fs::write(
            &path,
            "[defaults]\nconflict = \"skip\"\n\n[harness]\npolicy = \"fail-fast\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.conflict, ConflictPolicy::Skip);
        assert_eq!(cfg.harness.policy, EvaluationPolicy::FailFast);
        assert_eq!(cfg.output.format, "human");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/no/such/aspgen.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn get_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.conflict").unwrap(), "overwrite");
        assert_eq!(cfg.get("output.no_color").unwrap(), "false");
        assert_eq!(cfg.get("harness.policy").unwrap(), "collect-all");
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::UnknownConfigKey { .. })
        ));
    }

    #[test]
    fn set_writes_typed_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        set_in_file(&path, "harness.parallel", "true").unwrap();
        set_in_file(&path, "defaults.conflict", "fail").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.harness.parallel);
        assert_eq!(cfg.defaults.conflict, ConflictPolicy::Fail);
    }

    #[test]
    fn set_rejects_bad_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        assert!(set_in_file(&path, "defaults.conflict", "maybe").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = AppConfig::default();
        let parsed: AppConfig = toml::from_str(&cfg.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, cfg);
    }
}
