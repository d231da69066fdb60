//! Generator and application capability registries.
//!
//! Each generator and each application kind is described exactly once here.
//! Argument validation, output naming and template selection all derive from
//! these tables; nothing else matches on the enum variants for behaviour.
//!
//! # Adding a New Generator
//!
//! 1. Add a variant to `GeneratorKind` in `value_objects.rs`
//! 2. Add one [`GeneratorDef`] entry to [`GENERATOR_REGISTRY`]
//! 3. Ship a built-in template for it in `aspgen-adapters`

use crate::domain::value_objects::{ApplicationKind, GeneratorFlag, GeneratorKind};

/// .NET Core SDK version baked into project descriptors and container images.
pub const SDK_VERSION: &str = "1.1.0";

// ── Generator definitions ────────────────────────────────────────────────────

/// How a generator names the file it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputName {
    /// Always the same file name.
    Fixed(&'static str),
    /// `<name argument>.<extension>`.
    FromArgument { extension: &'static str },
    /// A fixed stem whose extension depends on a flag.
    Switched {
        stem: &'static str,
        default_extension: &'static str,
        flag: GeneratorFlag,
        flag_extension: &'static str,
    },
}

/// Everything the domain needs to know about one generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorDef {
    pub kind: GeneratorKind,

    /// One-line description for `aspgen list`.
    pub summary: &'static str,

    /// Whether a name argument must be supplied.
    pub requires_name: bool,

    pub output: OutputName,

    /// Flags this generator accepts. Anything else is rejected.
    pub flags: &'static [GeneratorFlag],
}

impl GeneratorDef {
    /// Extension stripped from (and appended to) a name argument, if any.
    pub fn name_extension(&self) -> Option<&'static str> {
        match self.output {
            OutputName::FromArgument { extension } => Some(extension),
            _ => None,
        }
    }

    pub fn accepts(&self, flag: GeneratorFlag) -> bool {
        self.flags.contains(&flag)
    }
}

pub static GENERATOR_REGISTRY: &[GeneratorDef] = &[
    GeneratorDef {
        kind: GeneratorKind::Program,
        summary: "Program.cs web host entry point",
        requires_name: false,
        output: OutputName::Fixed("Program.cs"),
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::AppSettings,
        summary: "appsettings.json configuration",
        requires_name: false,
        output: OutputName::Fixed("appsettings.json"),
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Startup,
        summary: "Startup.cs request pipeline",
        requires_name: false,
        output: OutputName::Fixed("Startup.cs"),
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Gitignore,
        summary: ".gitignore for .NET projects",
        requires_name: false,
        output: OutputName::Fixed(".gitignore"),
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Dockerfile,
        summary: "Dockerfile (--sqlite adds SQLite and EF migrations)",
        requires_name: false,
        output: OutputName::Fixed("Dockerfile"),
        flags: &[GeneratorFlag::Sqlite],
    },
    GeneratorDef {
        kind: GeneratorKind::NugetConfig,
        summary: "nuget.config package sources",
        requires_name: false,
        output: OutputName::Fixed("nuget.config"),
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Readme,
        summary: "README.md (--txt writes README.txt)",
        requires_name: false,
        output: OutputName::Switched {
            stem: "README",
            default_extension: "md",
            flag: GeneratorFlag::Txt,
            flag_extension: "txt",
        },
        flags: &[GeneratorFlag::Txt],
    },
    GeneratorDef {
        kind: GeneratorKind::Class,
        summary: "C# class",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Interface,
        summary: "C# interface",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Middleware,
        summary: "ASP.NET middleware with its IApplicationBuilder extension",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Json,
        summary: "empty JSON document",
        requires_name: true,
        output: OutputName::FromArgument { extension: "json" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::Jsx,
        summary: "React JSX component",
        requires_name: true,
        output: OutputName::FromArgument { extension: "jsx" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::MvcController,
        summary: "MVC controller",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::MvcView,
        summary: "Razor view",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cshtml" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::TagHelper,
        summary: "Razor tag helper",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
    GeneratorDef {
        kind: GeneratorKind::WebApiController,
        summary: "Web API controller",
        requires_name: true,
        output: OutputName::FromArgument { extension: "cs" },
        flags: &[],
    },
];

/// Look up the definition of a generator.
///
/// # Panics
///
/// Panics if the registry is missing an entry, which
/// `registry_covers_every_generator` rules out.
pub fn generator_def(kind: GeneratorKind) -> &'static GeneratorDef {
    GENERATOR_REGISTRY
        .iter()
        .find(|def| def.kind == kind)
        .expect("every GeneratorKind has a GENERATOR_REGISTRY entry")
}

// ── Application definitions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ApplicationDef {
    pub kind: ApplicationKind,
    pub summary: &'static str,
    /// Hosts an HTTP server and ships container files.
    pub web: bool,
    /// Uses Entity Framework with SQLite.
    pub sqlite: bool,
}

pub static APPLICATION_REGISTRY: &[ApplicationDef] = &[
    ApplicationDef {
        kind: ApplicationKind::Empty,
        summary: "Empty web application",
        web: true,
        sqlite: false,
    },
    ApplicationDef {
        kind: ApplicationKind::Console,
        summary: "Console application",
        web: false,
        sqlite: false,
    },
    ApplicationDef {
        kind: ApplicationKind::Web,
        summary: "MVC web application with Entity Framework (SQLite)",
        web: true,
        sqlite: true,
    },
    ApplicationDef {
        kind: ApplicationKind::WebApi,
        summary: "Web API application",
        web: true,
        sqlite: false,
    },
    ApplicationDef {
        kind: ApplicationKind::ClassLib,
        summary: "Class library",
        web: false,
        sqlite: false,
    },
    ApplicationDef {
        kind: ApplicationKind::UnitTest,
        summary: "xUnit test project",
        web: false,
        sqlite: false,
    },
];

/// Look up the definition of an application kind.
///
/// # Panics
///
/// Panics if the registry is missing an entry, which
/// `registry_covers_every_application` rules out.
pub fn application_def(kind: ApplicationKind) -> &'static ApplicationDef {
    APPLICATION_REGISTRY
        .iter()
        .find(|def| def.kind == kind)
        .expect("every ApplicationKind has an APPLICATION_REGISTRY entry")
}
