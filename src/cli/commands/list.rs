//! List command implementation.
//!
//! The `armory list` command prints the catalog in execution order.

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::ListArgs;
use crate::config::{Settings, SettingsOverrides};
use crate::error::{ArmoryError, Result};
use crate::shell::parse_system_path;
use crate::steps::{default_catalog, planned_commands, Step, StepContext};
use crate::ui::theme::ArmoryTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    #[serde(flatten)]
    step: &'a Step,
    commands: Vec<String>,
}

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    fn preview_context() -> StepContext {
        match Settings::resolve(&SettingsOverrides::default()) {
            Ok(settings) => StepContext::from_settings(&settings, true),
            Err(e) => {
                tracing::debug!("Previewing without settings: {}", e);
                StepContext {
                    target_dir: PathBuf::from("~"),
                    use_sudo: true,
                    home: None,
                    search_path: parse_system_path(),
                    dry_run: true,
                }
            }
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = default_catalog();
        let ctx = Self::preview_context();

        let entries: Vec<ListEntry<'_>> = catalog
            .iter()
            .map(|step| ListEntry {
                step,
                commands: planned_commands(step, &ctx)
                    .iter()
                    .map(|c| c.display())
                    .collect(),
            })
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| ArmoryError::Other(e.into()))?;
            ui.raw(&json);
            return Ok(CommandResult::success());
        }

        let theme = ArmoryTheme::detect();
        for (index, entry) in entries.iter().enumerate() {
            ui.message(&format!(
                "  {} {} {}",
                theme.dim.apply_to(format!("{}.", index + 1)),
                theme.highlight.apply_to(&entry.step.name),
                theme.dim.apply_to(format!("({})", entry.step.kind()))
            ));
            for cmd in &entry.commands {
                ui.message(&format!("      {}", theme.format_command(cmd)));
            }
        }

        Ok(CommandResult::success())
    }
}
