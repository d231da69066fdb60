//! aspgen core: hexagonal domain and application layers.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   aspgen-cli / aspgen-harness           │
//! │   (drive the services)                  │
//! └──────────────────┬──────────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Application Services                  │
//! │   ScaffoldService, TemplateService      │
//! └──────────────────┬──────────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Ports: TemplateStore, Filesystem,     │
//! │   TemplateRenderer (aspgen-adapters)    │
//! └──────────────────┬──────────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Domain: generator capabilities, args, │
//! │   project context, templates            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aspgen_core::prelude::*;
//!
//! let service = ScaffoldService::new(store, renderer, filesystem);
//! service.generate(&GenerationRequest::new("dockerfile", "./app").with_args(["--sqlite"]))?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationRequest, ScaffoldService, TemplateService,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ApplicationKind, ConflictPolicy, GeneratorKind, ProjectStructure, PromptAnswers,
        RenderContext, Template, TemplateId, TemplateMetadata, TemplateTarget,
    };
    pub use crate::error::{AspgenError, AspgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
