//! Domain value objects: GeneratorKind, ApplicationKind, GeneratorFlag.
//!
//! # Design
//!
//! These are pure value types: `Copy`, compared by value, no identity.
//! They hold NO capability logic. What each generator needs (a name argument,
//! an output extension, accepted flags) lives in `capabilities.rs`. This file
//! only defines the types, their string representations, and their `FromStr`
//! parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a capability entry in `capabilities.rs`
//! 4. Add the built-in template in `aspgen-adapters`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── GeneratorKind ────────────────────────────────────────────────────────────

/// A sub-generator that writes one file into an existing directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Program,
    AppSettings,
    Startup,
    Gitignore,
    Dockerfile,
    NugetConfig,
    Readme,
    Class,
    Interface,
    Middleware,
    Json,
    Jsx,
    MvcController,
    MvcView,
    TagHelper,
    WebApiController,
}

impl GeneratorKind {
    /// Every generator, in catalog order.
    pub const ALL: [GeneratorKind; 16] = [
        Self::Program,
        Self::AppSettings,
        Self::Startup,
        Self::Gitignore,
        Self::Dockerfile,
        Self::NugetConfig,
        Self::Readme,
        Self::Class,
        Self::Interface,
        Self::Middleware,
        Self::Json,
        Self::Jsx,
        Self::MvcController,
        Self::MvcView,
        Self::TagHelper,
        Self::WebApiController,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::AppSettings => "appsettings",
            Self::Startup => "startup",
            Self::Gitignore => "gitignore",
            Self::Dockerfile => "dockerfile",
            Self::NugetConfig => "nugetconfig",
            Self::Readme => "readme",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Middleware => "middleware",
            Self::Json => "json",
            Self::Jsx => "jsx",
            Self::MvcController => "mvccontroller",
            Self::MvcView => "mvcview",
            Self::TagHelper => "taghelper",
            Self::WebApiController => "webapicontroller",
        }
    }

    /// Whether this generator needs a name argument.
    ///
    /// Delegates to `capabilities::generator_def`.
    pub fn requires_name(self) -> bool {
        crate::domain::capabilities::generator_def(self).requires_name
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| DomainError::UnknownGenerator {
                name: s.to_string(),
            })
    }
}

// ── ApplicationKind ──────────────────────────────────────────────────────────

/// A whole-application template family used to bootstrap a project directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationKind {
    Empty,
    Console,
    Web,
    WebApi,
    ClassLib,
    UnitTest,
}

impl ApplicationKind {
    pub const ALL: [ApplicationKind; 6] = [
        Self::Empty,
        Self::Console,
        Self::Web,
        Self::WebApi,
        Self::ClassLib,
        Self::UnitTest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Console => "console",
            Self::Web => "web",
            Self::WebApi => "webapi",
            Self::ClassLib => "classlib",
            Self::UnitTest => "unittest",
        }
    }

    /// Whether applications of this kind host an HTTP server.
    ///
    /// Delegates to `capabilities::application_def`.
    pub fn is_web(self) -> bool {
        crate::domain::capabilities::application_def(self).web
    }
}

impl fmt::Display for ApplicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "console" | "consoleapp" => Ok(Self::Console),
            "web" | "mvc" | "webbasic" => Ok(Self::Web),
            "webapi" | "api" => Ok(Self::WebApi),
            "classlib" | "library" => Ok(Self::ClassLib),
            "unittest" | "xunit" => Ok(Self::UnitTest),
            other => Err(DomainError::UnknownApplicationKind {
                kind: other.to_string(),
            }),
        }
    }
}

// ── GeneratorFlag ────────────────────────────────────────────────────────────

/// A `--flag` token understood by at least one generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorFlag {
    /// Install SQLite and run EF migrations in the container.
    Sqlite,
    /// Write plain-text documentation instead of Markdown.
    Txt,
}

impl GeneratorFlag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Txt => "txt",
        }
    }

    /// Name of the template variable set when this flag is present.
    pub const fn variable(&self) -> &'static str {
        match self {
            Self::Sqlite => "SQLITE",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for GeneratorFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.as_str())
    }
}

impl FromStr for GeneratorFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches("--").to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "txt" => Ok(Self::Txt),
            other => Err(DomainError::InvalidArguments(format!(
                "unknown option: --{other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_names_round_trip() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.as_str().parse::<GeneratorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn generator_parse_is_case_insensitive() {
        assert_eq!(
            "Dockerfile".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::Dockerfile
        );
    }

    #[test]
    fn unknown_generator_is_error() {
        assert!(matches!(
            "angularcontroller".parse::<GeneratorKind>(),
            Err(DomainError::UnknownGenerator { .. })
        ));
    }

    #[test]
    fn mvc_is_alias_for_web() {
        assert_eq!(
            "mvc".parse::<ApplicationKind>().unwrap(),
            ApplicationKind::Web
        );
    }

    #[test]
    fn flags_parse_with_or_without_dashes() {
        assert_eq!(
            "--sqlite".parse::<GeneratorFlag>().unwrap(),
            GeneratorFlag::Sqlite
        );
        assert_eq!("txt".parse::<GeneratorFlag>().unwrap(), GeneratorFlag::Txt);
        assert!("--force".parse::<GeneratorFlag>().is_err());
    }
}
