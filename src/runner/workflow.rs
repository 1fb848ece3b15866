//! Installation run orchestration.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::warn;

use crate::config::Settings;
use crate::shell::CommandRunner;
use crate::steps::{execute_step, PathExport, Step, StepContext, StepResult, StepStatus};
use crate::ui::UserInterface;

/// Outcome of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Steps that completed.
    pub completed: Vec<String>,

    /// Steps that failed.
    pub failed: Vec<String>,

    /// Steps that had nothing to do.
    pub skipped: Vec<String>,

    /// Directory tools were installed into.
    pub target_dir: PathBuf,

    /// Shell profile the PATH export was appended to.
    pub profile: PathBuf,

    /// Whether the PATH export was written.
    pub profile_updated: bool,

    /// Commands were printed, not run.
    pub dry_run: bool,

    /// Total duration.
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl RunSummary {
    /// Whether every step finished without failure.
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    /// How to describe the completed steps: "planned" in a dry run.
    pub fn completed_label(&self) -> &'static str {
        if self.dry_run {
            "planned"
        } else {
            "installed"
        }
    }

    fn record(&mut self, result: &StepResult) {
        let bucket = match result.status {
            StepStatus::Completed => &mut self.completed,
            StepStatus::Failed => &mut self.failed,
            StepStatus::Skipped => &mut self.skipped,
        };
        bucket.push(result.name.clone());
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

/// Runs the step list, then writes the PATH export.
///
/// Steps run strictly in order. A failing step is reported and the run moves
/// on; nothing a step does can abort the run.
pub struct Orchestrator {
    steps: Vec<Step>,
    settings: Settings,
    dry_run: bool,
    search_path: Option<Vec<PathBuf>>,
}

impl Orchestrator {
    /// Create an orchestrator over `steps`.
    pub fn new(steps: Vec<Step>, settings: Settings) -> Self {
        Self {
            steps,
            settings,
            dry_run: false,
            search_path: None,
        }
    }

    /// Print commands instead of running them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directories searched for a toolchain binary after the toolchain's own.
    /// Defaults to the process `PATH`.
    pub fn search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_path = Some(dirs);
        self
    }

    fn step_context(&self) -> StepContext {
        let mut ctx = StepContext::from_settings(&self.settings, self.dry_run);
        if let Some(dirs) = &self.search_path {
            ctx.search_path = dirs.clone();
        }
        ctx
    }

    /// Execute every step, append the PATH export and print the summary.
    pub fn run(&self, runner: &mut dyn CommandRunner, ui: &mut dyn UserInterface) -> RunSummary {
        let start = Instant::now();
        let ctx = self.step_context();
        let target_dir = &self.settings.target_dir;

        let mut summary = RunSummary {
            completed: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            target_dir: target_dir.clone(),
            profile: self.settings.profile.clone(),
            profile_updated: false,
            dry_run: self.dry_run,
            duration: Duration::ZERO,
        };

        ui.show_header("Setting up tools...");
        self.ensure_target_dir(ui);

        let total = self.steps.len();
        for (index, step) in self.steps.iter().enumerate() {
            ui.show_progress(index + 1, total);
            let result = execute_step(step, &ctx, runner, ui);
            if result.status == StepStatus::Failed {
                warn!(
                    "Step '{}' failed: {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            summary.record(&result);
        }

        summary.profile_updated = self.append_path_export(ui);

        if self.dry_run {
            ui.message(&format!(
                "Dry run complete. Tools would be installed in the directory: {}.",
                target_dir.display()
            ));
        } else {
            ui.success(&format!(
                "Setup complete! All tools are installed in the directory: {}.",
                target_dir.display()
            ));
        }
        if summary.profile_updated {
            ui.message(&format!(
                "Tools directory {} added to PATH. Please restart your terminal for changes to take effect.",
                target_dir.display()
            ));
        }

        summary.duration = start.elapsed();
        ui.show_summary(&summary);
        summary
    }

    fn ensure_target_dir(&self, ui: &mut dyn UserInterface) {
        let dir = &self.settings.target_dir;
        if dir.is_dir() {
            return;
        }
        if self.dry_run {
            ui.message(&format!("Would create {}", dir.display()));
            return;
        }
        if let Err(e) = fs::create_dir_all(dir) {
            warn!("Could not create {}: {}", dir.display(), e);
            ui.warning(&format!("Could not create {}: {}", dir.display(), e));
        }
    }

    /// Returns whether the export was written.
    fn append_path_export(&self, ui: &mut dyn UserInterface) -> bool {
        let export = PathExport::new(
            &self.settings.profile,
            &self.settings.target_dir,
            self.settings.shell,
        );

        if self.dry_run {
            let [comment, line] = export.lines();
            ui.message(&format!(
                "Would append to {}:\n  {}\n  {}",
                export.profile().display(),
                comment,
                line
            ));
            return false;
        }

        match export.append() {
            Ok(()) => true,
            Err(e) => {
                ui.error(&e.to_string());
                false
            }
        }
    }
}
