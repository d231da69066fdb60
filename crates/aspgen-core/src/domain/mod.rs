//! Core domain layer for aspgen.
//!
//! Pure logic only: generator capabilities, argument parsing, namespace
//! inference, templates and rendering context. All I/O goes through ports
//! defined in the application layer.
//!
//! - **No I/O**: project context is built from descriptor *text*
//! - **Deterministic**: rendering never reads the clock or a RNG
//! - **Registry-driven**: behaviour per generator lives in `capabilities`

pub mod answers;
pub mod arguments;
pub mod capabilities;
pub mod entities;
pub mod error;
pub mod project_context;
pub mod value_objects;

mod validation;

pub use answers::{ConflictPolicy, PromptAnswers};
pub use arguments::GeneratorArgs;
pub use capabilities::{
    APPLICATION_REGISTRY, ApplicationDef, GENERATOR_REGISTRY, GeneratorDef, OutputName,
    SDK_VERSION, application_def, generator_def,
};
pub use entities::{
    common::RelativePath,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::RenderContext,
    template::{
        DirectorySpec, FileSpec, Template, TemplateBuilder, TemplateContent, TemplateId,
        TemplateMetadata, TemplateNode, TemplateRecord, TemplateSource, TemplateTarget,
        TemplateTree,
    },
};
pub use error::{DomainError, ErrorCategory};
pub use project_context::{
    DEFAULT_NAMESPACE, PROJECT_DESCRIPTOR, ProjectContext, sanitize_namespace,
};
pub use validation::DomainValidator;
pub use value_objects::{ApplicationKind, GeneratorFlag, GeneratorKind};
