//! Application ports (traits) for external dependencies.
//!
//! - **Driven (output) ports**: called by the services, implemented in
//!   `aspgen-adapters`
//!   - `Filesystem`: file reads and writes
//!   - `TemplateStore`: template storage/retrieval by target
//!   - `TemplateRenderer`: template rendering
//!
//! Driving ports are the service methods themselves, called by the CLI and
//! the conformance harness.

pub mod output;

pub use output::{Filesystem, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::MockFilesystem;
