//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage with spinners
//! - [`NonInteractiveUI`] for CI/headless environments and piped output
//! - [`MockUI`] for asserting on what a run printed
//!
//! # Example
//!
//! ```
//! use armory::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("armory");
//! ui.success("Setup complete!");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ArmoryTheme};

use crate::runner::RunSummary;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown, whatever the output mode.
    fn error(&mut self, msg: &str);

    /// Echo a command line about to run (verbose mode only).
    fn show_command(&mut self, command: &str);

    /// Show captured command output (verbose mode only).
    fn show_output(&mut self, output: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show progress (e.g., "Step 3 of 8").
    fn show_progress(&mut self, current: usize, total: usize);

    /// Show the end-of-run summary.
    fn show_summary(&mut self, summary: &RunSummary);

    /// Write machine-readable output (such as JSON) to stdout.
    ///
    /// Never styled and never suppressed by `--quiet`.
    fn raw(&mut self, text: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Stop and clear the spinner.
    fn finish(&mut self);
}
