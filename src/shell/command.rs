//! External command execution.
//!
//! Every step boils down to one or more [`CommandLine`]s handed to a
//! [`CommandRunner`]. [`SystemRunner`] spawns real processes; tests swap in
//! [`MockRunner`](super::MockRunner).

use crate::error::{ArmoryError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program invocation: executable, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path.
    pub program: String,

    /// Arguments passed verbatim (no shell splitting).
    pub args: Vec<String>,

    /// Working directory (inherits the parent's when `None`).
    pub cwd: Option<PathBuf>,
}

impl CommandLine {
    /// Create an invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Run `script` through `sh -c`.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::new("sh").arg("-c").arg(script)
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Human-readable form, as a user would type it.
    ///
    /// `sh -c <script>` renders as just the script.
    pub fn display(&self) -> String {
        if self.program == "sh" && self.args.len() == 2 && self.args[0] == "-c" {
            return self.args[1].clone();
        }
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| shell_quote(part))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Single-quote `word` when a POSIX shell would otherwise split or expand it.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Trimmed stderr, or a placeholder naming the exit code when empty.
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            match self.exit_code {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr.to_string()
        }
    }
}

/// Something that can execute a [`CommandLine`] to completion.
pub trait CommandRunner {
    /// Run the command, blocking until it exits.
    ///
    /// Returns `Err` only if the process could not be started; a non-zero
    /// exit is an `Ok` result with `success == false`.
    fn run(&mut self, command: &CommandLine) -> Result<CommandResult>;
}

/// Runs commands as real child processes with captured output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandLine) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(cwd) = &command.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Executing: {}", command);

        let output = cmd.output().map_err(|e| ArmoryError::SpawnFailed {
            command: command.display(),
            message: e.to_string(),
        })?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tracing::debug!(
            "'{}' exited with {:?} after {:?}",
            command,
            output.status.code(),
            duration
        );

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}
