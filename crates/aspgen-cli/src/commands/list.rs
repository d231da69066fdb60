//! `aspgen list`: generators (default), application kinds or templates.

use aspgen_core::{
    application::{GeneratorInfo, TemplateInfo, TemplateService},
    domain::{APPLICATION_REGISTRY, ApplicationDef},
};
use serde_json::{Value, json};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    commands::{scaffold_service, template_store},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    if args.apps {
        list_apps(format, &output)
    } else if args.templates {
        let service = TemplateService::new(Box::new(template_store(&global, &config)?));
        let mut templates = service.list()?;
        templates.sort_by(|a, b| a.target.cmp(&b.target));
        list_templates(&templates, format, &output)
    } else {
        let generators = scaffold_service(&global, &config)?.generators();
        list_generators(&generators, format, &output)
    }
}

fn list_generators(generators: &[GeneratorInfo], format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Generators:")?;
            for g in generators {
                output.print(&format!("  {:<18} {}", g.name, g.summary))?;
                let usage = usage(g);
                if !usage.is_empty() {
                    output.print(&format!("  {:<18}   {usage}", ""))?;
                }
            }
        }
        ListFormat::List => {
            for g in generators {
                output.print(g.name)?;
            }
        }
        ListFormat::Json => {
            let rows: Vec<Value> = generators.iter().map(generator_json).collect();
            output.json(&rows)?;
        }
    }
    Ok(())
}

fn list_apps(format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Application kinds:")?;
            for def in APPLICATION_REGISTRY {
                output.print(&format!("  {:<10} {}", def.kind.as_str(), def.summary))?;
            }
        }
        ListFormat::List => {
            for def in APPLICATION_REGISTRY {
                output.print(def.kind.as_str())?;
            }
        }
        ListFormat::Json => {
            let rows: Vec<Value> = APPLICATION_REGISTRY.iter().map(app_json).collect();
            output.json(&rows)?;
        }
    }
    Ok(())
}

fn list_templates(templates: &[TemplateInfo], format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            output.header("Templates:")?;
            for t in templates {
                output.print(&format!("  {:<28} {} ({} files)", t.target, t.name, t.files.len()))?;
            }
        }
        ListFormat::List => {
            for t in templates {
                output.print(&t.id)?;
            }
        }
        ListFormat::Json => {
            let rows: Vec<Value> = templates.iter().map(template_json).collect();
            output.json(&rows)?;
        }
    }
    Ok(())
}

fn usage(g: &GeneratorInfo) -> String {
    let mut parts = Vec::new();
    if g.requires_name {
        parts.push("<name>".to_string());
    }
    parts.extend(g.flags.iter().map(|f| format!("[{f}]")));
    parts.join(" ")
}

fn generator_json(g: &GeneratorInfo) -> Value {
    json!({
        "name": g.name,
        "summary": g.summary,
        "requires_name": g.requires_name,
        "flags": g.flags,
    })
}

fn app_json(def: &ApplicationDef) -> Value {
    json!({
        "kind": def.kind.as_str(),
        "summary": def.summary,
        "web": def.web,
        "sqlite": def.sqlite,
    })
}

fn template_json(t: &TemplateInfo) -> Value {
    json!({
        "id": t.id,
        "target": t.target,
        "name": t.name,
        "description": t.description,
        "tags": t.tags,
        "files": t.files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(requires_name: bool, flags: &[&str]) -> GeneratorInfo {
        GeneratorInfo {
            name: "dockerfile",
            summary: "Dockerfile",
            requires_name,
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn usage_shows_name_and_flags() {
        assert_eq!(usage(&info(false, &["--sqlite"])), "[--sqlite]");
        assert_eq!(usage(&info(true, &[])), "<name>");
        assert_eq!(usage(&info(false, &[])), "");
    }

    #[test]
    fn generator_json_fields() {
        let value = generator_json(&info(false, &["--sqlite"]));
        assert_eq!(value["name"], "dockerfile");
        assert_eq!(value["flags"][0], "--sqlite");
        assert_eq!(value["requires_name"], false);
    }

    #[test]
    fn every_app_kind_is_listed_as_json() {
        let rows: Vec<Value> = APPLICATION_REGISTRY.iter().map(app_json).collect();
        assert!(rows.iter().any(|r| r["kind"] == "web" && r["sqlite"] == true));
        assert_eq!(rows.len(), APPLICATION_REGISTRY.len());
    }
}
