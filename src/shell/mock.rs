//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation and answers from configured rules, so tests can
//! assert on exactly which external commands a run would have made.
//!
//! # Example
//!
//! ```
//! use armory::shell::{CommandLine, CommandRunner, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.fail_when("go install", 1, "network unreachable");
//!
//! let ok = runner.run(&CommandLine::new("pip").arg("install").arg("x")).unwrap();
//! let bad = runner.run(&CommandLine::new("go").arg("install").arg("y")).unwrap();
//!
//! assert!(ok.success);
//! assert!(!bad.success);
//! assert_eq!(runner.count_matching("install"), 2);
//! ```

use std::time::Duration;

use crate::error::{ArmoryError, Result};

use super::command::{CommandLine, CommandResult, CommandRunner};

#[derive(Debug, Clone)]
enum Outcome {
    Fail { code: i32, stderr: String },
    Respond { stdout: String },
    SpawnError { message: String },
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    outcome: Outcome,
}

/// Recording command runner.
///
/// Rules match when the command's [`display`](CommandLine::display) form
/// contains the rule's pattern. The first matching rule wins; commands with
/// no matching rule succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    invocations: Vec<CommandLine>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands containing `pattern` exit with `code` and `stderr`.
    pub fn fail_when(&mut self, pattern: &str, code: i32, stderr: &str) {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            outcome: Outcome::Fail {
                code,
                stderr: stderr.to_string(),
            },
        });
    }

    /// Make commands containing `pattern` succeed and print `stdout`.
    pub fn respond(&mut self, pattern: &str, stdout: &str) {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            outcome: Outcome::Respond {
                stdout: stdout.to_string(),
            },
        });
    }

    /// Make commands containing `pattern` fail to launch.
    pub fn spawn_error_when(&mut self, pattern: &str, message: &str) {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            outcome: Outcome::SpawnError {
                message: message.to_string(),
            },
        });
    }

    /// All invocations in the order they were made.
    pub fn invocations(&self) -> &[CommandLine] {
        &self.invocations
    }

    /// Display strings of all invocations.
    pub fn commands(&self) -> Vec<String> {
        self.invocations.iter().map(CommandLine::display).collect()
    }

    /// Number of invocations whose display form contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.invocations
            .iter()
            .filter(|c| c.display().contains(pattern))
            .count()
    }

    /// Whether any invocation contains `pattern`.
    pub fn ran(&self, pattern: &str) -> bool {
        self.count_matching(pattern) > 0
    }

    /// Index of the first invocation containing `pattern`.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.invocations
            .iter()
            .position(|c| c.display().contains(pattern))
    }
}

impl CommandRunner for MockRunner {
    fn run(&mut self, command: &CommandLine) -> Result<CommandResult> {
        self.invocations.push(command.clone());
        let display = command.display();

        let outcome = self
            .rules
            .iter()
            .find(|r| display.contains(&r.pattern))
            .map(|r| r.outcome.clone());

        match outcome {
            None => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            Some(Outcome::Respond { stdout }) => {
                Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
            }
            Some(Outcome::Fail { code, stderr }) => Ok(CommandResult::failure(
                Some(code),
                String::new(),
                stderr,
                Duration::ZERO,
            )),
            Some(Outcome::SpawnError { message }) => Err(ArmoryError::SpawnFailed {
                command: display,
                message,
            }),
        }
    }
}
