//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::runner::RunSummary;

use super::progress::format_duration;
use super::{
    ArmoryTheme, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ArmoryTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: ArmoryTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_command_output() {
            writeln!(self.term, "  {}", self.theme.format_command(command)).ok();
        }
    }

    fn show_output(&mut self, output: &str) {
        if self.mode.shows_command_output() {
            for line in output.lines() {
                writeln!(self.term, "    {}", self.theme.dim.apply_to(line)).ok();
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "{}",
                self.theme.dim.apply_to(format!("[{}/{}]", current, total))
            )
            .ok();
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if self.mode.shows_status() {
            writeln!(
                self.term,
                "\n{} {} {} {}",
                self.theme.success.apply_to(format!(
                    "{} {}",
                    summary.completed.len(),
                    summary.completed_label()
                )),
                self.theme.dim.apply_to(format!("· {} skipped", summary.skipped.len())),
                if summary.failed.is_empty() {
                    self.theme.dim.apply_to("· 0 failed".to_string())
                } else {
                    self.theme.error.apply_to(format!("· {} failed", summary.failed.len()))
                },
                self.theme
                    .dim
                    .apply_to(format!("· {}", format_duration(summary.duration))),
            )
            .ok();
        }
        if !summary.failed.is_empty() {
            writeln!(
                self.term,
                "{}",
                self.theme.format_error(&format!("Failed: {}", summary.failed.join(", ")))
            )
            .ok();
        }
    }

    fn raw(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }
}

/// Create the appropriate UI for the environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
