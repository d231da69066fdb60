//! Built-in templates and user override discovery.
//!
//! Every generator and every application kind ships with a template whose
//! text is embedded at compile time from `templates/`. [`all_templates`]
//! builds them; the result always covers the whole catalog.
//!
//! # Overrides
//!
//! A directory of `template.toml` manifests can replace built-ins (one
//! template per target, last insert wins). [`discover_overrides`] probes, in
//! order:
//!
//! 1. the directory passed by the caller (from `templates.local_path` in the
//!    CLI config)
//! 2. **`$ASPGEN_TEMPLATES_DIR`**
//!
//! and loads the first one that exists and yields at least one template.
//!
//! ```env
//! ASPGEN_TEMPLATES_DIR=./my-templates
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use aspgen_core::domain::{
    ApplicationKind, DirectorySpec, DomainError, FileSpec, GeneratorKind, SDK_VERSION, Template,
    TemplateContent, TemplateId, TemplateMetadata, TemplateNode, TemplateTarget, application_def,
    generator_def,
};

use crate::template_loader::FilesystemTemplateLoader;

/// Environment variable naming a user template directory.
pub const TEMPLATES_DIR_ENV: &str = "ASPGEN_TEMPLATES_DIR";

/// Path of the single file a generator template writes.
const GENERATOR_OUTPUT_PATH: &str = "{{OUTPUT_FILE}}";

// ── Embedded sources ──────────────────────────────────────────────────────────

const PROGRAM_CS: &str = include_str!("../templates/generators/program.cs");
const APPSETTINGS_JSON: &str = include_str!("../templates/generators/appsettings.json");
const STARTUP_CS: &str = include_str!("../templates/generators/startup.cs");
const GITIGNORE: &str = include_str!("../templates/generators/gitignore");
const DOCKERFILE: &str = include_str!("../templates/generators/dockerfile");
const NUGET_CONFIG: &str = include_str!("../templates/generators/nuget.config");
const README_MD: &str = include_str!("../templates/generators/readme.md");
const DOCKERFILE_NANO: &str = include_str!("../templates/apps/shared/Dockerfile.nano");
const WEB_CONFIG: &str = include_str!("../templates/apps/shared/web.config");

struct GeneratorTemplate {
    kind: GeneratorKind,
    source: &'static str,
}

static GENERATOR_TEMPLATES: &[GeneratorTemplate] = &[
    GeneratorTemplate {
        kind: GeneratorKind::Program,
        source: PROGRAM_CS,
    },
    GeneratorTemplate {
        kind: GeneratorKind::AppSettings,
        source: APPSETTINGS_JSON,
    },
    GeneratorTemplate {
        kind: GeneratorKind::Startup,
        source: STARTUP_CS,
    },
    GeneratorTemplate {
        kind: GeneratorKind::Gitignore,
        source: GITIGNORE,
    },
    GeneratorTemplate {
        kind: GeneratorKind::Dockerfile,
        source: DOCKERFILE,
    },
    GeneratorTemplate {
        kind: GeneratorKind::NugetConfig,
        source: NUGET_CONFIG,
    },
    GeneratorTemplate {
        kind: GeneratorKind::Readme,
        source: README_MD,
    },
    GeneratorTemplate {
        kind: GeneratorKind::Class,
        source: include_str!("../templates/generators/class.cs"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::Interface,
        source: include_str!("../templates/generators/interface.cs"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::Middleware,
        source: include_str!("../templates/generators/middleware.cs"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::Json,
        source: include_str!("../templates/generators/json.json"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::Jsx,
        source: include_str!("../templates/generators/jsx.jsx"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::MvcController,
        source: include_str!("../templates/generators/mvccontroller.cs"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::MvcView,
        source: include_str!("../templates/generators/mvcview.cshtml"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::TagHelper,
        source: include_str!("../templates/generators/taghelper.cs"),
    },
    GeneratorTemplate {
        kind: GeneratorKind::WebApiController,
        source: include_str!("../templates/generators/webapicontroller.cs"),
    },
];

struct ApplicationTemplate {
    kind: ApplicationKind,
    directories: &'static [&'static str],
    /// `(path, source)` pairs, written in order.
    files: &'static [(&'static str, &'static str)],
}

static APPLICATION_TEMPLATES: &[ApplicationTemplate] = &[
    ApplicationTemplate {
        kind: ApplicationKind::Empty,
        directories: &["wwwroot"],
        files: &[
            ("project.json", include_str!("../templates/apps/empty/project.json")),
            ("Program.cs", PROGRAM_CS),
            ("Startup.cs", STARTUP_CS),
            ("web.config", WEB_CONFIG),
            ("Dockerfile", DOCKERFILE),
            ("Dockerfile.nano", DOCKERFILE_NANO),
            (".gitignore", GITIGNORE),
        ],
    },
    ApplicationTemplate {
        kind: ApplicationKind::Console,
        directories: &[],
        files: &[
            ("project.json", include_str!("../templates/apps/console/project.json")),
            ("Program.cs", include_str!("../templates/apps/console/Program.cs")),
            (".gitignore", GITIGNORE),
        ],
    },
    ApplicationTemplate {
        kind: ApplicationKind::Web,
        directories: &["Controllers", "Views", "Views/Home", "wwwroot"],
        files: &[
            ("project.json", include_str!("../templates/apps/web/project.json")),
            ("Program.cs", PROGRAM_CS),
            ("Startup.cs", include_str!("../templates/apps/web/Startup.cs")),
            ("appsettings.json", APPSETTINGS_JSON),
            (
                "Controllers/HomeController.cs",
                include_str!("../templates/apps/web/HomeController.cs"),
            ),
            (
                "Views/_ViewImports.cshtml",
                include_str!("../templates/apps/web/_ViewImports.cshtml"),
            ),
            (
                "Views/Home/Index.cshtml",
                include_str!("../templates/apps/web/Index.cshtml"),
            ),
            ("web.config", WEB_CONFIG),
            ("Dockerfile", DOCKERFILE),
            ("Dockerfile.nano", DOCKERFILE_NANO),
            (".gitignore", GITIGNORE),
            ("README.md", README_MD),
        ],
    },
    ApplicationTemplate {
        kind: ApplicationKind::WebApi,
        directories: &["Controllers", "wwwroot"],
        files: &[
            ("project.json", include_str!("../templates/apps/webapi/project.json")),
            ("Program.cs", PROGRAM_CS),
            ("Startup.cs", include_str!("../templates/apps/webapi/Startup.cs")),
            ("appsettings.json", APPSETTINGS_JSON),
            (
                "Controllers/ValuesController.cs",
                include_str!("../templates/apps/webapi/ValuesController.cs"),
            ),
            ("web.config", WEB_CONFIG),
            ("Dockerfile", DOCKERFILE),
            ("Dockerfile.nano", DOCKERFILE_NANO),
            (".gitignore", GITIGNORE),
        ],
    },
    ApplicationTemplate {
        kind: ApplicationKind::ClassLib,
        directories: &[],
        files: &[
            ("project.json", include_str!("../templates/apps/classlib/project.json")),
            ("Class1.cs", include_str!("../templates/apps/classlib/Class1.cs")),
            (".gitignore", GITIGNORE),
        ],
    },
    ApplicationTemplate {
        kind: ApplicationKind::UnitTest,
        directories: &[],
        files: &[
            ("project.json", include_str!("../templates/apps/unittest/project.json")),
            ("Tests.cs", include_str!("../templates/apps/unittest/Tests.cs")),
            (".gitignore", GITIGNORE),
        ],
    },
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Build every built-in template: one per generator, one per application kind.
///
/// # Errors
///
/// Only if an embedded template is malformed, which the tests below rule out.
#[instrument]
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    let mut templates = Vec::with_capacity(GENERATOR_TEMPLATES.len() + APPLICATION_TEMPLATES.len());

    for entry in GENERATOR_TEMPLATES {
        templates.push(generator_template(entry)?);
    }
    for entry in APPLICATION_TEMPLATES {
        templates.push(application_template(entry)?);
    }

    debug!(count = templates.len(), "built-in templates ready");
    Ok(templates)
}

/// Load user templates from the first override directory that has any.
///
/// Returns an empty `Vec` when no candidate exists.
///
/// # Errors
///
/// `InvalidTemplate` if a candidate directory exists but cannot be read.
/// Individual bad template directories inside it are skipped with a warning.
#[instrument(skip_all)]
pub fn discover_overrides(configured: Option<&Path>) -> Result<Vec<Template>, DomainError> {
    for candidate in candidate_paths(configured) {
        if !candidate.is_dir() {
            debug!(path = %candidate.display(), "override path does not exist, skipping");
            continue;
        }

        let templates = FilesystemTemplateLoader::new(&candidate).load_all()?;
        if templates.is_empty() {
            debug!(path = %candidate.display(), "override directory has no templates");
            continue;
        }

        info!(
            path  = %candidate.display(),
            count = templates.len(),
            "template overrides loaded"
        );
        return Ok(templates);
    }

    Ok(Vec::new())
}

fn candidate_paths(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(dir) = configured {
        paths.push(dir.to_path_buf());
    }
    if let Ok(env_dir) = std::env::var(TEMPLATES_DIR_ENV) {
        if !env_dir.trim().is_empty() {
            paths.push(PathBuf::from(env_dir));
        }
    }
    paths
}

// ── Builders ──────────────────────────────────────────────────────────────────

fn generator_template(entry: &GeneratorTemplate) -> Result<Template, DomainError> {
    let def = generator_def(entry.kind);
    Template::builder()
        .id(TemplateId::new(format!("aspnet-{}", entry.kind), SDK_VERSION))
        .target(TemplateTarget::Generator(entry.kind))
        .metadata(
            TemplateMetadata::new(entry.kind.as_str())
                .version(SDK_VERSION)
                .description(def.summary)
                .tags(vec!["aspnet".into(), "generator".into()]),
        )
        .add_node(TemplateNode::File(FileSpec::new(
            GENERATOR_OUTPUT_PATH,
            TemplateContent::detect(entry.source),
        )))
        .build()
}

fn application_template(entry: &ApplicationTemplate) -> Result<Template, DomainError> {
    let def = application_def(entry.kind);
    let mut builder = Template::builder()
        .id(TemplateId::new(format!("aspnet-app-{}", entry.kind), SDK_VERSION))
        .target(TemplateTarget::Application(entry.kind))
        .metadata(
            TemplateMetadata::new(entry.kind.as_str())
                .version(SDK_VERSION)
                .description(def.summary)
                .tags(vec!["aspnet".into(), "application".into()]),
        );

    for dir in entry.directories {
        builder = builder.add_node(TemplateNode::Directory(DirectorySpec::new(*dir)));
    }
    for (path, source) in entry.files {
        builder = builder.add_node(TemplateNode::File(FileSpec::new(
            *path,
            TemplateContent::detect(*source),
        )));
    }

    builder.build()
}
