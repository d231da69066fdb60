//! Application skeletons as scenario preconditions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aspgen_core::{application::ScaffoldService, domain::PromptAnswers};
use tracing::{info, instrument};

use crate::error::{HarnessError, HarnessResult};

/// Seeds a directory with an application before dependent generators run.
///
/// The skeleton is fully written when [`bootstrap_application`] returns.
///
/// [`bootstrap_application`]: ApplicationBootstrapper::bootstrap_application
#[derive(Clone)]
pub struct ApplicationBootstrapper {
    service: Arc<ScaffoldService>,
}

impl ApplicationBootstrapper {
    pub fn new(service: Arc<ScaffoldService>) -> Self {
        Self { service }
    }

    /// Scaffold `kind` as `cwd/<name>` and return that directory.
    ///
    /// Every failure (unknown kind, existing or unwritable target) is a
    /// `Bootstrap` error.
    #[instrument(skip_all, fields(kind = %kind, name = %name, cwd = %cwd.display()))]
    pub fn bootstrap_application(
        &self,
        kind: &str,
        name: &str,
        cwd: &Path,
    ) -> HarnessResult<PathBuf> {
        let report = self
            .service
            .bootstrap(kind, name, cwd, &PromptAnswers::default())
            .map_err(|e| HarnessError::Bootstrap {
                kind: kind.to_string(),
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        info!(root = %report.root.display(), files = report.written.len(), "Application ready");
        Ok(report.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::GeneratorInvoker;

    fn bootstrapper() -> ApplicationBootstrapper {
        let invoker = GeneratorInvoker::with_builtin().unwrap();
        ApplicationBootstrapper::new(invoker.service().clone())
    }

    #[test]
    fn writes_skeleton_before_returning() {
        let dir = tempfile::TempDir::new().unwrap();

        let root = bootstrapper()
            .bootstrap_application("classlib", "emptyTest", dir.path())
            .unwrap();

        assert_eq!(root, dir.path().join("emptyTest"));
        let project = std::fs::read_to_string(root.join("project.json")).unwrap();
        assert!(project.contains("\"title\": \"emptyTest\""));
    }

    #[test]
    fn unknown_kind_is_a_bootstrap_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = bootstrapper()
            .bootstrap_application("winforms", "app", dir.path())
            .unwrap_err();
        assert!(matches!(err, HarnessError::Bootstrap { ref kind, .. } if kind == "winforms"));
    }

    #[test]
    fn existing_target_is_a_bootstrap_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("webTest")).unwrap();

        let err = bootstrapper()
            .bootstrap_application("mvc", "webTest", dir.path())
            .unwrap_err();
        assert!(matches!(err, HarnessError::Bootstrap { .. }));
    }
}
