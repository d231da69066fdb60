//! Read-only checks on generated files.
//!
//! Generated code is treated as opaque text: a [`Pattern`] is a literal
//! substring or a regex, found anywhere in the file unless anchored.

use std::fmt;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};

use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile `source` with `^`/`$` matching at line boundaries.
    pub fn regex(source: &str) -> HarnessResult<Self> {
        RegexBuilder::new(source)
            .multi_line(true)
            .build()
            .map(Self::Regex)
            .map_err(|e| HarnessError::InvalidScenario(format!("bad regex /{source}/: {e}")))
    }

    pub fn is_found_in(&self, text: &str) -> bool {
        match self {
            Self::Literal(needle) => text.contains(needle.as_str()),
            Self::Regex(re) => re.is_match(text),
        }
    }

    /// The pattern source as declared.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(needle) => needle,
            Self::Regex(re) => re.as_str(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(needle) => write!(f, "{needle:?}"),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Assertions rooted at a directory. Relative paths resolve against it.
#[derive(Debug, Clone)]
pub struct ArtifactAssertions {
    root: PathBuf,
}

impl ArtifactAssertions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assert_file_exists(&self, path: impl AsRef<Path>) -> HarnessResult<()> {
        let path = path.as_ref();
        if self.root.join(path).is_file() {
            Ok(())
        } else {
            Err(HarnessError::MissingFile {
                path: display(path),
            })
        }
    }

    pub fn assert_content_matches(
        &self,
        path: impl AsRef<Path>,
        pattern: &Pattern,
        description: &str,
    ) -> HarnessResult<()> {
        let path = path.as_ref();
        if pattern.is_found_in(&self.read(path)?) {
            Ok(())
        } else {
            Err(HarnessError::ContentMismatch {
                path: display(path),
                pattern: pattern.to_string(),
                description: description.to_string(),
            })
        }
    }

    pub fn assert_content_excludes(
        &self,
        path: impl AsRef<Path>,
        pattern: &Pattern,
        description: &str,
    ) -> HarnessResult<()> {
        let path = path.as_ref();
        if pattern.is_found_in(&self.read(path)?) {
            Err(HarnessError::UnexpectedContent {
                path: display(path),
                pattern: pattern.to_string(),
                description: description.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn read(&self, path: &Path) -> HarnessResult<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => HarnessError::MissingFile {
                path: display(path),
            },
            _ => HarnessError::io(full, e),
        })
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// One expected outcome of a scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    FileExists(PathBuf),
    ContentMatches {
        path: PathBuf,
        pattern: Pattern,
        description: String,
    },
    ContentExcludes {
        path: PathBuf,
        pattern: Pattern,
        description: String,
    },
}

impl Expectation {
    pub fn path(&self) -> &Path {
        match self {
            Self::FileExists(path)
            | Self::ContentMatches { path, .. }
            | Self::ContentExcludes { path, .. } => path,
        }
    }

    pub fn check(&self, assertions: &ArtifactAssertions) -> HarnessResult<()> {
        match self {
            Self::FileExists(path) => assertions.assert_file_exists(path),
            Self::ContentMatches {
                path,
                pattern,
                description,
            } => assertions.assert_content_matches(path, pattern, description),
            Self::ContentExcludes {
                path,
                pattern,
                description,
            } => assertions.assert_content_excludes(path, pattern, description),
        }
    }
}
