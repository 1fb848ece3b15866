//! Run command implementation.
//!
//! The `armory run` command installs the catalog.

use crate::cli::args::RunArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::runner::Orchestrator;
use crate::shell::{CommandRunner, SystemRunner};
use crate::steps::{default_catalog, select_steps};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs) -> Self {
        Self { args }
    }

    /// Execute against an explicit command runner.
    pub fn execute_with(
        &self,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        // Reject bad step names before anything runs
        let steps = select_steps(default_catalog(), &self.args.only, &self.args.skip)?;
        let settings = Settings::resolve(&self.args.overrides())?;

        let summary = Orchestrator::new(steps, settings)
            .dry_run(self.args.dry_run)
            .run(runner, ui);

        if self.args.strict && !summary.success() {
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(&mut SystemRunner::new(), ui)
    }
}
