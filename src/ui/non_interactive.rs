//! Non-interactive UI for CI/headless environments.

use crate::runner::RunSummary;

use super::progress::format_duration;
use super::theme::ArmoryTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Writes plain lines to stdout (errors and warnings to stderr) and never
/// draws spinners, so output stays readable in logs.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: ArmoryTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: ArmoryTheme::detect(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_command_output() {
            println!("  {}", self.theme.format_command(command));
        }
    }

    fn show_output(&mut self, output: &str) {
        if self.mode.shows_command_output() {
            for line in output.lines() {
                println!("    {}", line);
            }
        }
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if self.mode.shows_status() {
            println!(
                "\n{} {}, {} skipped, {} failed ({})",
                summary.completed.len(),
                summary.completed_label(),
                summary.skipped.len(),
                summary.failed.len(),
                format_duration(summary.duration)
            );
        }
        if !summary.failed.is_empty() {
            eprintln!(
                "{}",
                self.theme
                    .format_error(&format!("Failed: {}", summary.failed.join(", ")))
            );
        }
    }

    fn raw(&mut self, text: &str) {
        println!("{}", text);
    }
}

struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish(&mut self) {}
}
