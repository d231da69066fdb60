//! Application services - orchestrate use cases.

pub mod scaffold_service;
pub mod template_service;

pub use scaffold_service::{
    BootstrapReport, GenerationReport, GenerationRequest, GeneratorInfo, OUTPUT_FILE_VARIABLE,
    ScaffoldService,
};
pub use template_service::{TemplateInfo, TemplateService};
