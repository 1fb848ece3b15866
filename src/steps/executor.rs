//! Step execution engine.
//!
//! Runs one [`Step`] through a [`CommandRunner`], reporting progress to a
//! [`UserInterface`]. A step never returns an error: anything that goes
//! wrong becomes a failed [`StepResult`] and the caller moves on.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::error::Result;
use crate::shell::{
    parse_system_path, resolve_tool_path, CommandLine, CommandResult, CommandRunner,
};
use crate::ui::UserInterface;

use super::step::{BinaryLocation, SetupWhen, Step, StepAction};

/// Final state of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step did its work successfully.
    Completed,

    /// A command failed or the binary could not be placed.
    Failed,

    /// Nothing to do (repository already checked out, no setup to run).
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Result of executing a step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step name.
    pub name: String,

    /// Final status.
    pub status: StepStatus,

    /// Wall time spent in the step.
    pub duration: Duration,

    /// Exit code of the last command run, if any.
    pub exit_code: Option<i32>,

    /// Error text (if failed).
    pub error: Option<String>,
}

impl StepResult {
    fn completed(name: &str, duration: Duration, exit_code: Option<i32>) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Completed,
            duration,
            exit_code,
            error: None,
        }
    }

    fn skipped(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            duration,
            exit_code: None,
            error: None,
        }
    }

    fn failed(name: &str, duration: Duration, exit_code: Option<i32>, error: String) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            duration,
            exit_code,
            error: Some(error),
        }
    }
}

/// Everything a step needs to know about the run.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Directory receiving clones and copied binaries.
    pub target_dir: PathBuf,

    /// Prefix system package installs with `sudo`.
    pub use_sudo: bool,

    /// User home, for the toolchain's default binary directory.
    pub home: Option<PathBuf>,

    /// Directories searched last when locating a toolchain binary.
    pub search_path: Vec<PathBuf>,

    /// Print commands instead of running them.
    pub dry_run: bool,
}

impl StepContext {
    /// Build a context from resolved settings and the process `PATH`.
    pub fn from_settings(settings: &Settings, dry_run: bool) -> Self {
        Self {
            target_dir: settings.target_dir.clone(),
            use_sudo: settings.use_sudo,
            home: settings.home.clone(),
            search_path: parse_system_path(),
            dry_run,
        }
    }
}

/// `[sudo] apt install -y <package>`.
pub fn system_package_command(package: &str, use_sudo: bool) -> CommandLine {
    let base = if use_sudo {
        CommandLine::new("sudo").arg("apt")
    } else {
        CommandLine::new("apt")
    };
    base.args(["install", "-y", package])
}

/// `pip install <package>`.
pub fn python_package_command(package: &str) -> CommandLine {
    CommandLine::new("pip").args(["install", package])
}

/// `git clone <url> <dest>`.
pub fn clone_command(url: &str, dest: &Path) -> CommandLine {
    CommandLine::new("git")
        .args(["clone", url])
        .arg(dest.to_string_lossy())
}

/// `go install <module>`.
pub fn toolchain_install_command(module: &str) -> CommandLine {
    CommandLine::new("go").args(["install", module])
}

/// The commands a step would run on a fresh machine, for previews.
pub fn planned_commands(step: &Step, ctx: &StepContext) -> Vec<CommandLine> {
    match &step.action {
        StepAction::SystemPackage { package } => {
            vec![system_package_command(package, ctx.use_sudo)]
        }
        StepAction::PythonPackage { package } => vec![python_package_command(package)],
        StepAction::Repository {
            url,
            directory,
            setup,
            ..
        } => {
            let dest = ctx.target_dir.join(directory);
            let mut cmds = vec![clone_command(url, &dest)];
            if let Some(script) = setup {
                cmds.push(CommandLine::shell(script.as_str()).current_dir(&dest));
            }
            cmds
        }
        StepAction::Toolchain { module, .. } => vec![toolchain_install_command(module)],
    }
}

/// Execute a single step.
pub fn execute_step(
    step: &Step,
    ctx: &StepContext,
    runner: &mut dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> StepResult {
    let start = Instant::now();
    tracing::debug!("Executing step '{}' ({})", step.name, step.kind());

    let mut exec = Exec { ctx, runner, ui };
    let (status, exit_code, error) = match &step.action {
        StepAction::SystemPackage { package } => {
            exec.install_package(package, system_package_command(package, ctx.use_sudo))
        }
        StepAction::PythonPackage { package } => {
            exec.install_package(package, python_package_command(package))
        }
        StepAction::Repository {
            url,
            directory,
            setup,
            setup_when,
        } => exec.repository(&step.name, url, directory, setup.as_deref(), *setup_when),
        StepAction::Toolchain {
            module,
            binary,
            locate,
        } => exec.toolchain(&step.name, module, binary, locate),
    };

    let duration = start.elapsed();
    match status {
        StepStatus::Completed => StepResult::completed(&step.name, duration, exit_code),
        StepStatus::Skipped => StepResult::skipped(&step.name, duration),
        StepStatus::Failed => StepResult::failed(
            &step.name,
            duration,
            exit_code,
            error.unwrap_or_else(|| "unknown error".to_string()),
        ),
    }
}

type Outcome = (StepStatus, Option<i32>, Option<String>);

struct Exec<'a> {
    ctx: &'a StepContext,
    runner: &'a mut dyn CommandRunner,
    ui: &'a mut dyn UserInterface,
}

impl Exec<'_> {
    /// Run one command, never failing: launch errors become failed results.
    fn run(&mut self, command: &CommandLine) -> CommandResult {
        if self.ctx.dry_run {
            self.ui.message(&format!("Would run: {}", command));
            return CommandResult::success(String::new(), String::new(), Duration::ZERO);
        }

        self.ui.show_command(&command.display());
        // sudo may prompt for a password on the terminal
        let mut spinner =
            (command.program != "sudo").then(|| self.ui.start_spinner(&command.display()));
        let result = self.runner.run(command);
        if let Some(spinner) = spinner.as_mut() {
            spinner.finish();
        }

        match result {
            Ok(result) => {
                if !result.stdout.trim().is_empty() {
                    self.ui.show_output(result.stdout.trim_end());
                }
                result
            }
            Err(e) => {
                tracing::warn!("{}", e);
                CommandResult::failure(None, String::new(), e.to_string(), Duration::ZERO)
            }
        }
    }

    /// Success lines are only true once something actually ran.
    fn report_success(&mut self, msg: &str) {
        if !self.ctx.dry_run {
            self.ui.success(msg);
        }
    }

    fn install_package(&mut self, package: &str, command: CommandLine) -> Outcome {
        self.ui.message(&format!("Installing {}...", package));
        let result = self.run(&command);
        if result.success {
            self.report_success(&format!("{} installed successfully.", package));
            (StepStatus::Completed, result.exit_code, None)
        } else {
            let error = result.error_text();
            self.ui
                .error(&format!("Failed to install {}: {}", package, error));
            (StepStatus::Failed, result.exit_code, Some(error))
        }
    }

    fn repository(
        &mut self,
        name: &str,
        url: &str,
        directory: &str,
        setup: Option<&str>,
        setup_when: SetupWhen,
    ) -> Outcome {
        self.ui.message(&format!("Cloning {}...", name));
        let dest = self.ctx.target_dir.join(directory);

        let cloned = if dest.exists() {
            self.ui.message(&format!(
                "{} already exists in {}. Skipping clone.",
                name,
                dest.display()
            ));
            false
        } else {
            let result = self.run(&clone_command(url, &dest));
            if !result.success {
                let error = result.error_text();
                self.ui.error(&format!("Failed to clone {}: {}", name, error));
                return (StepStatus::Failed, result.exit_code, Some(error));
            }
            self.report_success(&format!("Cloned {} into {}.", name, dest.display()));
            true
        };

        let script = match setup {
            Some(script) if cloned || setup_when == SetupWhen::Always => script,
            _ if cloned => return (StepStatus::Completed, Some(0), None),
            _ => return (StepStatus::Skipped, None, None),
        };

        self.ui.message(&format!("Setting up {}...", name));
        let result = self.run(&CommandLine::shell(script).current_dir(&dest));
        if result.success {
            self.report_success(&format!("{} setup completed successfully.", name));
            (StepStatus::Completed, result.exit_code, None)
        } else {
            let error = result.error_text();
            self.ui.error(&format!("Failed to set up {}: {}", name, error));
            (StepStatus::Failed, result.exit_code, Some(error))
        }
    }

    fn toolchain(
        &mut self,
        name: &str,
        module: &str,
        binary: &str,
        locate: &BinaryLocation,
    ) -> Outcome {
        self.ui.message(&format!("Installing {}...", name));
        let result = self.run(&toolchain_install_command(module));
        if !result.success {
            let error = result.error_text();
            self.ui.error(&format!("Failed to install {}: {}", name, error));
            return (StepStatus::Failed, result.exit_code, Some(error));
        }
        self.report_success(&format!("{} installed successfully.", name));

        let dest = self.ctx.target_dir.join(binary);
        if self.ctx.dry_run {
            self.ui.message(&format!(
                "Would copy {} binary to {}",
                binary,
                dest.display()
            ));
            return (StepStatus::Completed, result.exit_code, None);
        }

        let source = match locate {
            BinaryLocation::Fixed(path) => Some(path.clone()).filter(|p| p.is_file()),
            BinaryLocation::ToolchainBin => self.locate_toolchain_binary(binary),
        };
        let Some(source) = source else {
            let error = format!("{} binary not found after installation.", binary);
            self.ui.error(&error);
            return (StepStatus::Failed, result.exit_code, Some(error));
        };

        if same_file(&source, &dest) {
            self.ui.message(&format!(
                "{} binary is already at {}.",
                binary,
                dest.display()
            ));
            return (StepStatus::Completed, result.exit_code, None);
        }

        self.ui.message(&format!(
            "Copying {} binary to {}...",
            binary,
            dest.display()
        ));
        match copy_binary(&source, &dest) {
            Ok(()) => {
                self.ui.success(&format!(
                    "{} binary copied to {}.",
                    binary,
                    dest.display()
                ));
                (StepStatus::Completed, result.exit_code, None)
            }
            Err(e) => {
                // {:#} keeps the io cause after the context line
                let error = format!("{:#}", e);
                self.ui
                    .error(&format!("Failed to copy {} binary: {}", binary, error));
                (StepStatus::Failed, result.exit_code, Some(error))
            }
        }
    }

    /// Search GOBIN, GOPATH/bin, ~/go/bin, then PATH.
    fn locate_toolchain_binary(&mut self, binary: &str) -> Option<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(gobin) = self.go_env("GOBIN") {
            candidates.push(PathBuf::from(gobin).join(binary));
        }
        if let Some(gopath) = self.go_env("GOPATH") {
            if let Some(first) = std::env::split_paths(&gopath).next() {
                candidates.push(first.join("bin").join(binary));
            }
        }
        if let Some(home) = &self.ctx.home {
            candidates.push(home.join("go").join("bin").join(binary));
        }

        let found = candidates
            .into_iter()
            .find(|c| c.is_file())
            .or_else(|| resolve_tool_path(binary, &self.ctx.search_path));
        tracing::debug!("Located {} at {:?}", binary, found);
        found
    }

    /// `go env <var>`, trimmed; `None` if unset or the query fails.
    fn go_env(&mut self, var: &str) -> Option<String> {
        let query = CommandLine::new("go").args(["env", var]);
        match self.runner.run(&query) {
            Ok(r) if r.success => Some(r.stdout.trim().to_string()).filter(|s| !s.is_empty()),
            Ok(r) => {
                tracing::debug!("'{}' failed: {}", query, r.error_text());
                None
            }
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_binary(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)
        .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn context(target: &Path) -> StepContext {
        StepContext {
            target_dir: target.to_path_buf(),
            use_sudo: true,
            home: None,
            search_path: Vec::new(),
            dry_run: false,
        }
    }

    #[test]
    fn system_package_uses_sudo_apt() {
        let cmd = system_package_command("python3-venv", true);
        assert_eq!(cmd.display(), "sudo apt install -y python3-venv");
        let cmd = system_package_command("python3-venv", false);
        assert_eq!(cmd.display(), "apt install -y python3-venv");
    }

    #[test]
    fn package_success_reports_installed() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();

        let result = execute_step(
            &Step::python_package("pwncat-cs"),
            &context(temp.path()),
            &mut runner,
            &mut ui,
        );

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(runner.commands(), vec!["pip install pwncat-cs"]);
        assert!(ui.has_message("Installing pwncat-cs..."));
        assert!(ui.has_success("pwncat-cs installed successfully."));
    }

    #[test]
    fn package_failure_reports_stderr() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.fail_when("apt install", 100, "E: Unable to locate package");
        let mut ui = MockUI::new();

        let result = execute_step(
            &Step::system_package("python3-poetry"),
            &context(temp.path()),
            &mut runner,
            &mut ui,
        );

        assert_eq!(result.status, StepStatus::Failed);
        assert_eq!(result.exit_code, Some(100));
        assert!(ui.has_error("Failed to install python3-poetry: E: Unable to locate package"));
    }

    #[test]
    fn launch_failure_is_a_step_failure() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.spawn_error_when("pip", "No such file or directory");
        let mut ui = MockUI::new();

        let result = execute_step(
            &Step::python_package("pwncat-cs"),
            &context(temp.path()),
            &mut runner,
            &mut ui,
        );

        assert_eq!(result.status, StepStatus::Failed);
        assert!(result.error.unwrap().contains("No such file"));
    }

    #[test]
    fn fresh_clone_runs_setup_in_checkout() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone);

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].display(),
            format!(
                "git clone https://github.com/biskit069/g2l {}",
                temp.path().join("g2l").display()
            )
        );
        assert_eq!(calls[1].display(), "python3 setup.py install");
        assert_eq!(calls[1].cwd, Some(temp.path().join("g2l")));
        assert!(ui.has_success("g2l setup completed successfully."));
    }

    #[test]
    fn existing_checkout_skips_clone_and_setup() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("routersploit")).unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::repository("routersploit", "https://github.com/threat9/routersploit")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone);

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Skipped);
        assert!(runner.invocations().is_empty());
        assert!(ui.has_message("routersploit already exists in"));
        assert!(ui.has_message("Skipping clone."));
    }

    #[test]
    fn existing_checkout_still_runs_always_setup() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("pwncat")).unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::repository("pwncat", "https://github.com/calebstewart/pwncat")
            .with_setup("poetry install", SetupWhen::Always);

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(runner.commands(), vec!["poetry install"]);
        assert!(!runner.ran("git clone"));
    }

    #[test]
    fn clone_failure_skips_setup() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.fail_when("git clone", 128, "fatal: repository not found");
        let mut ui = MockUI::new();
        let step = Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::Always);

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Failed);
        assert!(!runner.ran("setup.py"));
        assert!(ui.has_error("Failed to clone g2l: fatal: repository not found"));
    }

    #[test]
    fn setup_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.fail_when("setup.py", 1, "error: invalid command");
        let mut ui = MockUI::new();
        let step = Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone);

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Failed);
        assert!(ui.has_error("Failed to set up g2l: error: invalid command"));
    }

    #[test]
    fn toolchain_failure_does_not_copy() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.fail_when("go install", 1, "go: command not found");
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Failed);
        assert_eq!(runner.invocations().len(), 1);
        assert!(!temp.path().join("asnmap").exists());
        assert!(ui.has_error("Failed to install asnmap"));
        assert!(!ui.has_message("Copying"));
    }

    #[test]
    fn toolchain_copies_binary_from_gobin() {
        let temp = TempDir::new().unwrap();
        let gobin = TempDir::new().unwrap();
        fs::write(gobin.path().join("asnmap"), "binary").unwrap();

        let mut runner = MockRunner::new();
        runner.respond("go env GOBIN", &format!("{}\n", gobin.path().display()));
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(
            fs::read_to_string(temp.path().join("asnmap")).unwrap(),
            "binary"
        );
        assert!(ui.has_success("asnmap binary copied to"));
    }

    #[test]
    fn toolchain_falls_back_to_gopath_bin() {
        let temp = TempDir::new().unwrap();
        let gopath = TempDir::new().unwrap();
        fs::create_dir(gopath.path().join("bin")).unwrap();
        fs::write(gopath.path().join("bin").join("asnmap"), "from-gopath").unwrap();

        let mut runner = MockRunner::new();
        runner.respond("go env GOBIN", "\n");
        runner.respond("go env GOPATH", &gopath.path().display().to_string());
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(
            fs::read_to_string(temp.path().join("asnmap")).unwrap(),
            "from-gopath"
        );
    }

    #[test]
    fn toolchain_missing_binary_fails() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Failed);
        assert!(ui.has_error("asnmap binary not found after installation."));
    }

    #[test]
    fn toolchain_fixed_location_is_used() {
        let temp = TempDir::new().unwrap();
        let bin = TempDir::new().unwrap();
        let fixed = bin.path().join("asnmap");
        fs::write(&fixed, "fixed").unwrap();

        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap")
            .with_binary_location(BinaryLocation::Fixed(fixed));

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert!(!runner.ran("go env"));
        assert_eq!(fs::read_to_string(temp.path().join("asnmap")).unwrap(), "fixed");
    }

    #[test]
    fn toolchain_binary_already_in_target_is_not_copied_onto_itself() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("asnmap"), "in-place").unwrap();

        let mut runner = MockRunner::new();
        runner.respond("go env GOBIN", &temp.path().display().to_string());
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(
            fs::read_to_string(temp.path().join("asnmap")).unwrap(),
            "in-place"
        );
        assert!(ui.has_message("already at"));
    }

    #[test]
    fn dry_run_runs_nothing() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let mut ctx = context(temp.path());
        ctx.dry_run = true;
        let step = Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone);

        let result = execute_step(&step, &ctx, &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Completed);
        assert!(runner.invocations().is_empty());
        assert!(ui.has_message("Would run: git clone https://github.com/biskit069/g2l"));
        assert!(ui.has_message("Would run: python3 setup.py install"));
    }

    #[test]
    fn planned_commands_for_repository() {
        let ctx = context(Path::new("/home/op"));
        let step = Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone);
        let cmds: Vec<String> = planned_commands(&step, &ctx)
            .iter()
            .map(CommandLine::display)
            .collect();
        assert_eq!(
            cmds,
            vec![
                "git clone https://github.com/biskit069/g2l /home/op/g2l".to_string(),
                "python3 setup.py install".to_string(),
            ]
        );
    }

    #[test]
    fn dry_run_claims_no_success() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let mut ctx = context(temp.path());
        ctx.dry_run = true;

        for step in crate::steps::default_catalog() {
            execute_step(&step, &ctx, &mut runner, &mut ui);
        }

        assert!(runner.invocations().is_empty());
        assert!(ui.successes().is_empty());
        assert!(ui.has_message("Would copy asnmap binary to"));
        assert!(!temp.path().join("g2l").exists());
    }

    #[test]
    fn command_stdout_is_shown() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        runner.respond("pip install", "Successfully installed pwncat-cs-0.5.4\n");
        let mut ui = MockUI::new();

        execute_step(
            &Step::python_package("pwncat-cs"),
            &context(temp.path()),
            &mut runner,
            &mut ui,
        );

        assert_eq!(ui.commands(), ["pip install pwncat-cs"]);
        assert_eq!(ui.outputs(), ["Successfully installed pwncat-cs-0.5.4"]);
    }

    #[test]
    fn sudo_commands_run_without_spinner() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();

        execute_step(
            &Step::system_package("python3-venv"),
            &context(temp.path()),
            &mut runner,
            &mut ui,
        );

        assert!(runner.ran("sudo apt install -y python3-venv"));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn commands_without_sudo_get_a_spinner() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let mut ctx = context(temp.path());
        ctx.use_sudo = false;

        execute_step(&Step::system_package("python3-venv"), &ctx, &mut runner, &mut ui);

        assert_eq!(ui.spinners(), ["apt install -y python3-venv"]);
    }

    #[test]
    fn toolchain_copy_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let gobin = TempDir::new().unwrap();
        fs::write(gobin.path().join("asnmap"), "binary").unwrap();

        let mut runner = MockRunner::new();
        runner.respond("go env GOBIN", &gobin.path().display().to_string());
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap");

        let result = execute_step(
            &step,
            &context(&temp.path().join("missing")),
            &mut runner,
            &mut ui,
        );

        assert_eq!(result.status, StepStatus::Failed);
        assert!(ui.has_error("Failed to copy asnmap binary: copying"));
        assert!(result.error.unwrap().contains("copying"));
        assert!(!ui.has_success("binary copied"));
    }

    #[test]
    fn toolchain_fixed_location_missing_fails() {
        let temp = TempDir::new().unwrap();
        let mut runner = MockRunner::new();
        let mut ui = MockUI::new();
        let step = Step::toolchain("asnmap", "example.com/asnmap@latest", "asnmap")
            .with_binary_location(BinaryLocation::Fixed(temp.path().join("nowhere/asnmap")));

        let result = execute_step(&step, &context(temp.path()), &mut runner, &mut ui);

        assert_eq!(result.status, StepStatus::Failed);
        assert_eq!(runner.commands(), vec!["go install example.com/asnmap@latest"]);
        assert!(ui.has_error("asnmap binary not found after installation."));
        assert!(!temp.path().join("asnmap").exists());
    }
}
