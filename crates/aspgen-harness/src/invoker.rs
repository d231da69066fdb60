//! Blocking generator invocation.

use std::path::Path;
use std::sync::Arc;

use aspgen_adapters::local_scaffold_service;
use aspgen_core::{
    application::{ApplicationError, GenerationReport, GenerationRequest, ScaffoldService},
    domain::PromptAnswers,
    error::AspgenError,
};
use tracing::{debug, instrument};

use crate::error::{HarnessError, HarnessResult};

/// Runs named generators to completion.
///
/// [`ScaffoldService::generate`] writes every file before it returns, so
/// callers never observe partial output.
#[derive(Clone)]
pub struct GeneratorInvoker {
    service: Arc<ScaffoldService>,
}

impl GeneratorInvoker {
    pub fn new(service: Arc<ScaffoldService>) -> Self {
        Self { service }
    }

    /// Built-in templates on the local filesystem.
    pub fn with_builtin() -> HarnessResult<Self> {
        let service = local_scaffold_service().map_err(|e| HarnessError::GenerationFailed {
            generator: "*".into(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn service(&self) -> &Arc<ScaffoldService> {
        &self.service
    }

    /// Invoke `generator` in `cwd` with default answers.
    pub fn invoke<S: AsRef<str>>(
        &self,
        generator: &str,
        args: &[S],
        cwd: &Path,
    ) -> HarnessResult<GenerationReport> {
        self.invoke_with(generator, args, cwd, &PromptAnswers::default())
    }

    #[instrument(skip_all, fields(generator = %generator, cwd = %cwd.display()))]
    pub fn invoke_with<S: AsRef<str>>(
        &self,
        generator: &str,
        args: &[S],
        cwd: &Path,
        answers: &PromptAnswers,
    ) -> HarnessResult<GenerationReport> {
        let request = GenerationRequest::new(generator, cwd)
            .with_args(args.iter().map(|a| a.as_ref().to_string()))
            .with_answers(answers.clone());

        let report = self
            .service
            .generate(&request)
            .map_err(|e| invocation_error(generator, e))?;
        debug!(written = report.written.len(), "Generator finished");
        Ok(report)
    }
}

fn invocation_error(generator: &str, err: AspgenError) -> HarnessError {
    match err {
        AspgenError::Application(ApplicationError::UnknownGenerator { name, .. }) => {
            HarnessError::UnknownGenerator { name }
        }
        AspgenError::Application(
            e @ (ApplicationError::PreconditionFailed { .. } | ApplicationError::FileConflict { .. }),
        ) => HarnessError::GeneratorPrecondition {
            generator: generator.to_string(),
            reason: e.to_string(),
        },
        AspgenError::Domain(e) => HarnessError::GeneratorPrecondition {
            generator: generator.to_string(),
            reason: e.to_string(),
        },
        AspgenError::Application(ApplicationError::FilesystemError { path, reason }) => {
            HarnessError::Io { path, reason }
        }
        other => HarnessError::GenerationFailed {
            generator: generator.to_string(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_generator_is_distinct() {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        let dir = tempfile::TempDir::new().unwrap();

        let err = invoker
            .invoke::<&str>("bogus", &[], dir.path())
            .unwrap_err();
        assert_eq!(
            err,
            HarnessError::UnknownGenerator {
                name: "bogus".into()
            }
        );
    }

    #[test]
    fn bad_arguments_are_precondition_errors() {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        let dir = tempfile::TempDir::new().unwrap();

        for (generator, args) in [("class", vec![]), ("program", vec!["--sqlite"])] {
            let err = invoker.invoke(generator, &args, dir.path()).unwrap_err();
            assert!(
                matches!(err, HarnessError::GeneratorPrecondition { .. }),
                "{generator}: {err}"
            );
        }
    }

    #[test]
    fn unparsable_descriptor_is_a_precondition_error() {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("project.json"), "not json").unwrap();

        let err = invoker.invoke::<&str>("startup", &[], dir.path()).unwrap_err();
        assert!(matches!(err, HarnessError::GeneratorPrecondition { .. }));
    }

    #[test]
    fn files_exist_when_invoke_returns() {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        let dir = tempfile::TempDir::new().unwrap();

        let report = invoker.invoke("readme", &["--txt"], dir.path()).unwrap();

        assert_eq!(report.written, vec![dir.path().join("README.txt")]);
        let text = std::fs::read_to_string(dir.path().join("README.txt")).unwrap();
        assert!(text.starts_with("# MyNamespace\n"));
    }

    #[test]
    fn answers_travel_with_the_invocation() {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let answers = PromptAnswers::default().variable("NAMESPACE", "Contoso");

        invoker
            .invoke_with::<&str>("readme", &[], dir.path(), &answers)
            .unwrap();
        invoker
            .invoke::<&str>("startup", &[], dir.path())
            .unwrap();

        let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        let startup = std::fs::read_to_string(dir.path().join("Startup.cs")).unwrap();
        assert!(readme.starts_with("# Contoso\n"));
        assert!(startup.contains("namespace MyNamespace"));
    }
}
