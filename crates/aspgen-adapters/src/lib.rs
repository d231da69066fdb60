//! Infrastructure adapters for aspgen.
//!
//! This crate implements the ports defined in `aspgen_core::application::ports`
//! and ships the built-in ASP.NET templates. It contains all of the I/O.

pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;

use aspgen_core::{application::ScaffoldService, error::AspgenResult};

/// A [`ScaffoldService`] over the local filesystem with built-in templates.
pub fn local_scaffold_service() -> AspgenResult<ScaffoldService> {
    Ok(ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin()?),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    ))
}
