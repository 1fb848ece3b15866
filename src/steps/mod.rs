//! Installation steps and their execution.
//!
//! This module provides the step model and execution engine:
//!
//! - [`Step`] - One catalog entry (package, repository or toolchain install)
//! - [`default_catalog`] - The fixed list of steps, in execution order
//! - [`execute_step`] - Run a step, turning every failure into a result
//! - [`StepStatus`] / [`StepResult`] - Execution outcome
//! - [`PathExport`] - The shell profile PATH export
//!
//! # Example
//!
//! ```
//! use armory::shell::MockRunner;
//! use armory::steps::{execute_step, Step, StepContext, StepStatus};
//! use armory::ui::MockUI;
//!
//! let ctx = StepContext {
//!     target_dir: std::env::temp_dir(),
//!     use_sudo: false,
//!     home: None,
//!     search_path: Vec::new(),
//!     dry_run: false,
//! };
//! let mut runner = MockRunner::new();
//! let mut ui = MockUI::new();
//!
//! let result = execute_step(&Step::python_package("pwncat-cs"), &ctx, &mut runner, &mut ui);
//! assert_eq!(result.status, StepStatus::Completed);
//! assert_eq!(runner.commands(), vec!["pip install pwncat-cs"]);
//! ```

pub mod catalog;
pub mod executor;
pub mod profile;
pub mod step;

pub use catalog::{default_catalog, select_steps, ASNMAP_MODULE};
pub use executor::{execute_step, planned_commands, StepContext, StepResult, StepStatus};
pub use profile::{PathExport, PATH_COMMENT};
pub use step::{BinaryLocation, SetupWhen, Step, StepAction};
