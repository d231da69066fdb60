use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Rendered output ready for materialization.
///
/// `root` is where entries are written: the invocation's working directory for
/// a generator, or the new project directory for a bootstrapped application.
/// Entry paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: RelativePath, content: String) {
        self.entries
            .push(FsEntry::File(FileToWrite { path, content }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        self.add_file(path.into(), content.into());
        self
    }

    pub fn with_directory(mut self, path: impl Into<RelativePath>) -> Self {
        self.add_directory(path.into());
        self
    }

    /// Check the structure can be written as-is.
    ///
    /// Rejects empty output and duplicate paths. Containment is already
    /// guaranteed by [`RelativePath`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "rendered output is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            FsEntry::Directory(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            FsEntry::File(_) => None,
        })
    }

    /// Absolute destination of a relative entry path.
    pub fn resolve(&self, path: &RelativePath) -> PathBuf {
        self.root.join(path.as_path())
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_files_and_directories() {
        let structure = ProjectStructure::new("/tmp/webTest")
            .with_directory("Controllers")
            .with_file("Controllers/HomeController.cs", "class HomeController {}")
            .with_file("project.json", "{}");

        assert_eq!(structure.entry_count(), 3);
        assert_eq!(structure.files().count(), 2);
        assert_eq!(structure.directories().count(), 1);
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        let dup = ProjectStructure::new("/tmp/x")
            .with_file("Startup.cs", "")
            .with_file("Startup.cs", "");
        assert!(matches!(
            dup.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
        assert!(ProjectStructure::new("/tmp/x").validate().is_err());
    }

    #[test]
    fn resolves_against_root() {
        let structure = ProjectStructure::new("/work");
        assert_eq!(
            structure.resolve(&RelativePath::new("Views/Index.cshtml")),
            PathBuf::from("/work/Views/Index.cshtml")
        );
    }
}
