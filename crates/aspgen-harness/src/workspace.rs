//! Per-scenario scratch directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;

use crate::error::{HarnessError, HarnessResult};

const WORKSPACE_PREFIX: &str = "aspgen-";

/// Allocates isolated workspaces.
pub struct TempWorkspace;

impl TempWorkspace {
    /// Create a fresh, empty, uniquely named directory under the system
    /// temp dir.
    pub fn create() -> HarnessResult<Workspace> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| HarnessError::io(std::env::temp_dir(), e))?;
        Ok(Workspace::from_dir(dir))
    }

    /// Like [`create`](Self::create), under `parent`.
    pub fn create_in(parent: &Path) -> HarnessResult<Workspace> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| HarnessError::io(parent, e))?;
        Ok(Workspace::from_dir(dir))
    }
}

/// A directory owned by one scenario. Removed on drop unless kept.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    run_id: Uuid,
}

impl Workspace {
    fn from_dir(dir: TempDir) -> Self {
        let run_id = Uuid::new_v4();
        debug!(path = %dir.path().display(), %run_id, "Workspace created");
        Self { dir, run_id }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Resolve a workspace-relative path.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Persist the directory and return its path.
    pub fn keep(self) -> PathBuf {
        let path = self.dir.keep();
        debug!(path = %path.display(), "Workspace retained");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn creates_empty_unique_directories() {
        let a = TempWorkspace::create().unwrap();
        let b = TempWorkspace::create().unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().is_absolute());
        assert_eq!(std::fs::read_dir(a.path()).unwrap().count(), 0);
        assert_ne!(a.run_id(), b.run_id());
    }

    #[test]
    fn concurrent_creation_never_collides() {
        let parent = tempfile::TempDir::new().unwrap();
        let paths: Vec<PathBuf> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| TempWorkspace::create_in(parent.path()).unwrap().keep()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn removed_on_drop_unless_kept() {
        let dropped = TempWorkspace::create().unwrap();
        let path = dropped.path().to_path_buf();
        drop(dropped);
        assert!(!path.exists());

        let kept = TempWorkspace::create().unwrap().keep();
        assert!(kept.is_dir());
        std::fs::remove_dir_all(kept).unwrap();
    }

    #[test]
    fn missing_parent_is_an_io_error() {
        let err = TempWorkspace::create_in(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, HarnessError::Io { .. }));
    }
}
