//! Installation step definitions.

use serde::Serialize;
use std::path::PathBuf;

/// When a repository's setup command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupWhen {
    /// Only right after a fresh clone.
    AfterClone,
    /// Every run, even when the clone was skipped.
    Always,
}

/// How a toolchain-installed binary is found before copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", content = "path", rename_all = "snake_case")]
pub enum BinaryLocation {
    /// A fixed, known path.
    Fixed(PathBuf),
    /// The toolchain's configured binary directory, then `PATH`.
    ToolchainBin,
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    /// Install one package through the system package manager.
    SystemPackage { package: String },

    /// Install one package from the Python package index.
    PythonPackage { package: String },

    /// Clone a repository into the target directory, optionally running a
    /// setup command inside the clone.
    Repository {
        url: String,
        directory: String,
        setup: Option<String>,
        setup_when: SetupWhen,
    },

    /// Install through the language toolchain, then copy the resulting
    /// binary into the target directory.
    Toolchain {
        module: String,
        binary: String,
        locate: BinaryLocation,
    },
}

/// One entry of the installation catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Human-readable label, also used by `--only`/`--skip`.
    pub name: String,

    /// The action to perform.
    #[serde(flatten)]
    pub action: StepAction,
}

impl Step {
    /// A system package install named after the package.
    pub fn system_package(package: &str) -> Self {
        Self {
            name: package.to_string(),
            action: StepAction::SystemPackage {
                package: package.to_string(),
            },
        }
    }

    /// A Python package install named after the package.
    pub fn python_package(package: &str) -> Self {
        Self {
            name: package.to_string(),
            action: StepAction::PythonPackage {
                package: package.to_string(),
            },
        }
    }

    /// A repository clone into a directory named after the step.
    pub fn repository(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            action: StepAction::Repository {
                url: url.to_string(),
                directory: name.to_string(),
                setup: None,
                setup_when: SetupWhen::AfterClone,
            },
        }
    }

    /// A toolchain install of `module` producing `binary`.
    pub fn toolchain(name: &str, module: &str, binary: &str) -> Self {
        Self {
            name: name.to_string(),
            action: StepAction::Toolchain {
                module: module.to_string(),
                binary: binary.to_string(),
                locate: BinaryLocation::ToolchainBin,
            },
        }
    }

    /// Attach a setup command to a repository step. No-op for other kinds.
    pub fn with_setup(mut self, command: &str, when: SetupWhen) -> Self {
        if let StepAction::Repository {
            setup, setup_when, ..
        } = &mut self.action
        {
            *setup = Some(command.to_string());
            *setup_when = when;
        }
        self
    }

    /// Override how a toolchain step finds its binary. No-op for other kinds.
    pub fn with_binary_location(mut self, location: BinaryLocation) -> Self {
        if let StepAction::Toolchain { locate, .. } = &mut self.action {
            *locate = location;
        }
        self
    }

    /// Short label for the action kind.
    pub fn kind(&self) -> &'static str {
        match self.action {
            StepAction::SystemPackage { .. } => "system-package",
            StepAction::PythonPackage { .. } => "python-package",
            StepAction::Repository { .. } => "repository",
            StepAction::Toolchain { .. } => "toolchain",
        }
    }
}
