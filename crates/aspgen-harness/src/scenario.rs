//! Declarative test cases.
//!
//! A [`Scenario`] is a generator invocation plus the files and content it
//! must produce. Scenarios are built with [`ScenarioBuilder`] and are
//! immutable afterwards.
//!
//! Paths in a scenario are relative. The working directory resolves against
//! the scenario's base directory: the workspace root, or the bootstrapped
//! application directory when the scenario declares a bootstrap.
//! Expectation paths resolve against the effective working directory.

use std::path::{Component, Path, PathBuf};

use aspgen_core::domain::PromptAnswers;

use crate::assertions::{Expectation, Pattern};
use crate::error::{HarnessError, HarnessResult};

/// Application skeleton written before the generator runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    generator: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    bootstrap: Option<Bootstrap>,
    answers: PromptAnswers,
    expectations: Vec<Expectation>,
    pending: Option<String>,
}

impl Scenario {
    pub fn builder(name: impl Into<String>, generator: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(name, generator)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn bootstrap(&self) -> Option<&Bootstrap> {
        self.bootstrap.as_ref()
    }

    pub fn answers(&self) -> &PromptAnswers {
        &self.answers
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Why the scenario is skipped, if it is.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Directory the generator runs in, given the workspace root.
    pub fn invocation_dir(&self, workspace: &Path) -> PathBuf {
        let base = match &self.bootstrap {
            Some(b) => workspace.join(&b.name),
            None => workspace.to_path_buf(),
        };
        match &self.working_dir {
            Some(dir) => base.join(dir),
            None => base,
        }
    }
}

/// Fluent builder for [`Scenario`].
///
/// Regex compilation errors are collected and reported by [`build`].
///
/// [`build`]: ScenarioBuilder::build
#[derive(Debug)]
pub struct ScenarioBuilder {
    scenario: Scenario,
    errors: Vec<String>,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>, generator: impl Into<String>) -> Self {
        Self {
            scenario: Scenario {
                name: name.into(),
                generator: generator.into(),
                args: Vec::new(),
                working_dir: None,
                bootstrap: None,
                answers: PromptAnswers::default(),
                expectations: Vec::new(),
                pending: None,
            },
            errors: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenario.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Run the generator in `dir`, relative to the scenario base directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scenario.working_dir = Some(dir.into());
        self
    }

    /// Bootstrap an application named `name` and run the generator inside it.
    pub fn bootstrap(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.scenario.bootstrap = Some(Bootstrap {
            kind: kind.into(),
            name: name.into(),
        });
        self
    }

    pub fn answers(mut self, answers: PromptAnswers) -> Self {
        self.scenario.answers = answers;
        self
    }

    pub fn expect_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario
            .expectations
            .push(Expectation::FileExists(path.into()));
        self
    }

    pub fn expect_match(
        mut self,
        path: impl Into<PathBuf>,
        pattern: Pattern,
        description: impl Into<String>,
    ) -> Self {
        self.scenario.expectations.push(Expectation::ContentMatches {
            path: path.into(),
            pattern,
            description: description.into(),
        });
        self
    }

    pub fn expect_regex(
        self,
        path: impl Into<PathBuf>,
        source: &str,
        description: impl Into<String>,
    ) -> Self {
        match Pattern::regex(source) {
            Ok(pattern) => self.expect_match(path, pattern, description),
            Err(e) => self.record(e),
        }
    }

    pub fn expect_no_match(
        mut self,
        path: impl Into<PathBuf>,
        pattern: Pattern,
        description: impl Into<String>,
    ) -> Self {
        self.scenario.expectations.push(Expectation::ContentExcludes {
            path: path.into(),
            pattern,
            description: description.into(),
        });
        self
    }

    pub fn expect_no_regex(
        self,
        path: impl Into<PathBuf>,
        source: &str,
        description: impl Into<String>,
    ) -> Self {
        match Pattern::regex(source) {
            Ok(pattern) => self.expect_no_match(path, pattern, description),
            Err(e) => self.record(e),
        }
    }

    /// Keep the scenario in the registry without running it.
    pub fn pending(mut self, reason: impl Into<String>) -> Self {
        self.scenario.pending = Some(reason.into());
        self
    }

    pub fn build(self) -> HarnessResult<Scenario> {
        let Self { scenario, errors } = self;
        if scenario.name.trim().is_empty() {
            return Err(HarnessError::InvalidScenario("scenario name is empty".into()));
        }
        if !errors.is_empty() {
            return Err(HarnessError::InvalidScenario(format!(
                "{}: {}",
                scenario.name,
                errors.join("; ")
            )));
        }
        let escaping = scenario
            .working_dir
            .as_deref()
            .into_iter()
            .chain(scenario.expectations.iter().map(Expectation::path))
            .find(|p| !is_workspace_local(p));
        if let Some(path) = escaping {
            return Err(HarnessError::InvalidScenario(format!(
                "{}: path {} must stay inside the workspace",
                scenario.name,
                path.display()
            )));
        }
        Ok(scenario)
    }

    fn record(mut self, err: HarnessError) -> Self {
        self.errors.push(err.to_string());
        self
    }
}

/// Relative and free of `..`, so it resolves under any workspace root.
fn is_workspace_local(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let s = Scenario::builder("aspnet:dockerfile", "dockerfile")
            .args(["--sqlite"])
            .expect_file("Dockerfile")
            .expect_regex("Dockerfile", "^FROM", "base image")
            .expect_no_match("Dockerfile", Pattern::literal("nanoserver"), "not nano")
            .build()
            .unwrap();

        assert_eq!(s.args(), ["--sqlite"]);
        assert_eq!(s.expectations().len(), 3);
        assert!(matches!(s.expectations()[0], Expectation::FileExists(_)));
        assert!(matches!(s.expectations()[2], Expectation::ContentExcludes { .. }));
        assert!(!s.is_pending());
    }

    #[test]
    fn invocation_dir_follows_bootstrap_and_working_dir() {
        let root = Path::new("/ws");

        let plain = Scenario::builder("a", "program").build().unwrap();
        assert_eq!(plain.invocation_dir(root), PathBuf::from("/ws"));

        let boot = Scenario::builder("b", "startup")
            .bootstrap("classlib", "emptyTest")
            .build()
            .unwrap();
        assert_eq!(boot.invocation_dir(root), PathBuf::from("/ws/emptyTest"));

        let nested = Scenario::builder("c", "class")
            .bootstrap("mvc", "webTest")
            .in_dir("Models")
            .build()
            .unwrap();
        assert_eq!(nested.invocation_dir(root), PathBuf::from("/ws/webTest/Models"));
    }

    #[test]
    fn bad_regex_fails_build() {
        let err = Scenario::builder("x", "readme")
            .expect_regex("README.md", "([", "broken")
            .build()
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario(msg) if msg.starts_with("x: ")));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let err = Scenario::builder("x", "readme")
            .expect_file("/etc/passwd")
            .build()
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario(_)));
    }

    #[test]
    fn parent_components_are_rejected() {
        let err = Scenario::builder("escape", "gitignore")
            .in_dir("../outside")
            .build()
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidScenario(msg) if msg.contains("../outside")));

        assert!(Scenario::builder("escape", "gitignore")
            .expect_file("sub/../../.gitignore")
            .build()
            .is_err());

        assert!(Scenario::builder("local", "gitignore")
            .in_dir("./src")
            .expect_file("./.gitignore")
            .build()
            .is_ok());
    }

    #[test]
    fn pending_keeps_reason() {
        let s = Scenario::builder("x", "class")
            .args(["MyClass"])
            .pending("name inference unreliable")
            .build()
            .unwrap();
        assert_eq!(s.pending(), Some("name inference unreliable"));
    }
}
