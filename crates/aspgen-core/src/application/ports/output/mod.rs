//! Driven (output) ports, implemented by infrastructure.

use crate::domain::{
    ProjectStructure, RenderContext, Template, TemplateId, TemplateTarget,
};
use crate::error::AspgenResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `aspgen_adapters::filesystem::LocalFilesystem` (production)
/// - `aspgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AspgenResult<()>;

    /// Write content to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, content: &str) -> AspgenResult<()>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> AspgenResult<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> AspgenResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> AspgenResult<()>;
}

/// Port for template storage and retrieval.
///
/// A store holds at most one template per [`TemplateTarget`]; inserting a
/// template for a target that already has one replaces it.
pub trait TemplateStore: Send + Sync {
    /// The template registered for a target.
    fn resolve(&self, target: TemplateTarget) -> AspgenResult<Template>;

    fn get(&self, id: &TemplateId) -> AspgenResult<Template>;

    /// All templates, ordered by target.
    fn list(&self) -> AspgenResult<Vec<Template>>;

    /// Insert or replace the template for its target.
    fn insert(&self, template: Template) -> AspgenResult<()>;

    fn remove(&self, id: &TemplateId) -> AspgenResult<()>;
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a project structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> AspgenResult<ProjectStructure>;
}
