//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use aspgen_core::domain::{ApplicationKind, ConflictPolicy};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "aspgen",
    bin_name = "aspgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "ASP.NET application and sub-generator scaffolding",
    long_about = "aspgen scaffolds ASP.NET Core applications, runs the \
                  sub-generators (Dockerfile, Startup.cs, controllers, ...) \
                  inside them, and verifies the generators against their \
                  conformance suite.",
    after_help = "EXAMPLES:\n\
        \x20 aspgen new mvc webTest\n\
        \x20 aspgen generate --cwd webTest mvccontroller HomeController\n\
        \x20 aspgen g dockerfile --sqlite\n\
        \x20 aspgen verify --parallel",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new application.
    #[command(
        visible_alias = "n",
        about = "Create a new application",
        after_help = "EXAMPLES:\n\
            \x20 aspgen new web webTest\n\
            \x20 aspgen new classlib Contoso.Core --dir src\n\
            \x20 aspgen new webapi api --dry-run"
    )]
    New(NewArgs),

    /// Run a sub-generator.
    #[command(
        visible_alias = "g",
        about = "Run a sub-generator",
        after_help = "Options for aspgen itself go before the generator name;\n\
            everything after it is passed to the generator.\n\n\
            EXAMPLES:\n\
            \x20 aspgen generate readme --txt\n\
            \x20 aspgen generate --cwd webTest class Customer.cs\n\
            \x20 aspgen g --conflict skip startup"
    )]
    Generate(GenerateArgs),

    /// List generators, application kinds or templates.
    #[command(
        visible_alias = "ls",
        about = "List generators and templates",
        after_help = "EXAMPLES:\n\
            \x20 aspgen list\n\
            \x20 aspgen list --apps\n\
            \x20 aspgen list --templates --format json"
    )]
    List(ListArgs),

    /// Run the sub-generator conformance suite.
    #[command(
        about = "Verify generators against the conformance suite",
        after_help = "EXAMPLES:\n\
            \x20 aspgen verify\n\
            \x20 aspgen verify --filter dockerfile --fail-fast\n\
            \x20 aspgen verify --parallel --threads 4 --include-pending\n\
            \x20 aspgen --output-format json verify"
    )]
    Verify(VerifyArgs),

    /// Create a configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 aspgen init           # platform config location\n\
            \x20 aspgen init --local   # ./.aspgen.toml"
    )]
    Init(InitArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 aspgen completions bash > ~/.local/share/bash-completion/completions/aspgen\n\
            \x20 aspgen completions zsh  > ~/.zfunc/_aspgen"
    )]
    Completions(CompletionsArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 aspgen config get defaults.conflict\n\
            \x20 aspgen config set harness.parallel true\n\
            \x20 aspgen config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    #[arg(value_enum, value_name = "KIND", help = "Application kind")]
    pub kind: AppKind,

    /// Becomes the directory name and the root namespace.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: String,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Parent directory (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(
        long = "cwd",
        value_name = "DIR",
        help = "Directory to generate into (default: current directory)"
    )]
    pub cwd: Option<PathBuf>,

    #[arg(
        long = "conflict",
        value_enum,
        value_name = "POLICY",
        help = "What to do when a file exists (default from config)"
    )]
    pub conflict: Option<ConflictArg>,

    /// Extra template variable; may be repeated.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Template variable override (e.g. NAMESPACE=Contoso)"
    )]
    pub variables: Vec<(String, String)>,

    #[arg(value_name = "GENERATOR", help = "Generator name (see 'aspgen list')")]
    pub generator: String,

    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments passed to the generator"
    )]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    Overwrite,
    Skip,
    Fail,
}

impl From<ConflictArg> for ConflictPolicy {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Overwrite => Self::Overwrite,
            ConflictArg::Skip => Self::Skip,
            ConflictArg::Fail => Self::Fail,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

// ── list ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long = "apps", conflicts_with = "templates", help = "List application kinds")]
    pub apps: bool,

    #[arg(long = "templates", help = "List registered templates")]
    pub templates: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    Table,
    /// One name per line.
    List,
    Json,
}

// ── verify ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[arg(long = "parallel", help = "Run scenarios in parallel")]
    pub parallel: bool,

    #[arg(
        long = "threads",
        value_name = "N",
        requires = "parallel",
        help = "Worker threads for --parallel"
    )]
    pub threads: Option<usize>,

    #[arg(long = "fail-fast", help = "Stop each scenario at its first failed check")]
    pub fail_fast: bool,

    #[arg(long = "include-pending", help = "Also run scenarios marked pending")]
    pub include_pending: bool,

    #[arg(
        long = "filter",
        value_name = "TEXT",
        help = "Only run scenarios whose name contains TEXT"
    )]
    pub filter: Option<String>,

    #[arg(long = "keep-workspaces", help = "Keep scenario directories for inspection")]
    pub keep_workspaces: bool,

    #[arg(long = "list", help = "List scenarios without running them")]
    pub list: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long = "local", help = "Create ./.aspgen.toml instead")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.conflict`.
        key: String,
    },
    /// Set a key in the configuration file.
    Set {
        /// Dotted key path.
        key: String,
        value: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Application kinds accepted by `aspgen new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AppKind {
    Empty,
    Console,
    /// Also accepted as `mvc`.
    #[value(alias = "mvc")]
    Web,
    #[value(name = "webapi")]
    WebApi,
    #[value(name = "classlib")]
    ClassLib,
    #[value(name = "unittest")]
    UnitTest,
}

impl From<AppKind> for ApplicationKind {
    fn from(kind: AppKind) -> Self {
        match kind {
            AppKind::Empty => Self::Empty,
            AppKind::Console => Self::Console,
            AppKind::Web => Self::Web,
            AppKind::WebApi => Self::WebApi,
            AppKind::ClassLib => Self::ClassLib,
            AppKind::UnitTest => Self::UnitTest,
        }
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(ApplicationKind::from(*self).as_str())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
