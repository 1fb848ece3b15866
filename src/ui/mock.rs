//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use armory::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Installing g2l...");
//! ui.success("Setup complete!");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("g2l"));
//! assert!(ui.has_success("Setup complete!"));
//! ```

use crate::runner::RunSummary;

use super::{SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    commands: Vec<String>,
    outputs: Vec<String>,
    headers: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    summaries: Vec<RunSummary>,
    raw: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all echoed command lines.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all captured command output blocks.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured progress updates.
    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all machine-readable output.
    pub fn raw_output(&self) -> &[String] {
        &self.raw
    }

    /// Get all captured run summaries.
    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn show_output(&mut self, output: &str) {
        self.outputs.push(output.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        self.summaries.push(summary.clone());
    }

    fn raw(&mut self, text: &str) {
        self.raw.push(text.to_string());
    }
}

/// Mock spinner; finishing it does nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish(&mut self) {}
}
