//! armory - Bootstrap a fixed security toolkit onto a Debian-family host.
//!
//! armory runs an ordered list of installation steps (system packages, a
//! Python package, git clones with optional setup commands and one Go tool),
//! keeps going when a step fails, and finally appends a PATH export for the
//! tools directory to the user's shell profile.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Run settings resolved from flags, environment and defaults
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Run orchestration and summaries
//! - [`shell`] - External command execution and platform probing
//! - [`steps`] - The step catalog and per-step execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use armory::shell::MockRunner;
//! use armory::steps::{execute_step, Step, StepContext};
//! use armory::ui::MockUI;
//!
//! let ctx = StepContext {
//!     target_dir: std::env::temp_dir().join("armory-doc"),
//!     use_sudo: true,
//!     home: None,
//!     search_path: Vec::new(),
//!     dry_run: true,
//! };
//! let mut runner = MockRunner::new();
//! let mut ui = MockUI::new();
//!
//! execute_step(&Step::system_package("python3-venv"), &ctx, &mut runner, &mut ui);
//! assert!(ui.has_message("Would run: sudo apt install -y python3-venv"));
//! assert!(runner.invocations().is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{ArmoryError, Result};
