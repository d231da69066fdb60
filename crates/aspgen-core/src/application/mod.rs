//! Application layer for aspgen.
//!
//! - **Services**: use case orchestration (`ScaffoldService`, `TemplateService`)
//! - **Ports**: traits for the filesystem, template store and renderer
//! - **Errors**: orchestration failures
//!
//! Business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BootstrapReport, GenerationReport, GenerationRequest, GeneratorInfo, OUTPUT_FILE_VARIABLE,
    ScaffoldService, TemplateInfo, TemplateService,
};

pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
