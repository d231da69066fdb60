//! Generator conformance harness.
//!
//! Drives a named generator with arguments and a working directory, then
//! checks the produced files by existence and by substring or regex match.
//!
//! ```rust,ignore
//! use aspgen_harness::prelude::*;
//!
//! let runner = ScenarioRunner::with_builtin(HarnessConfig::default())?;
//! let report = runner.run(&catalog::subgenerator_scenarios()?);
//! println!("{report}");
//! ```

pub mod assertions;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod invoker;
pub mod registry;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod workspace;

pub use assertions::{ArtifactAssertions, Expectation, Pattern};
pub use bootstrap::ApplicationBootstrapper;
pub use config::{EvaluationPolicy, HarnessConfig};
pub use error::{ErrorKind, HarnessError, HarnessResult};
pub use invoker::GeneratorInvoker;
pub use registry::ScenarioRegistry;
pub use report::{FailureRecord, RunReport, RunSummary, ScenarioReport, ScenarioStatus};
pub use runner::ScenarioRunner;
pub use scenario::{Scenario, ScenarioBuilder};
pub use workspace::{TempWorkspace, Workspace};

pub mod prelude {
    pub use crate::catalog;
    pub use crate::{
        ArtifactAssertions, EvaluationPolicy, HarnessConfig, HarnessError, HarnessResult,
        Pattern, RunReport, Scenario, ScenarioRegistry, ScenarioRunner, ScenarioStatus,
    };
}
