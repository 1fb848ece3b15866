//! Run settings resolution.
//!
//! armory has no configuration file. A run's settings come from CLI flags
//! (which clap also fills from `ARMORY_*` environment variables) layered
//! over defaults computed from the invoking user's environment.

use std::path::PathBuf;

use crate::error::{ArmoryError, Result};
use crate::shell::{detect_shell, is_elevated, login_name, ShellType};

/// Values explicitly requested by the user.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// Directory to clone into and copy binaries into.
    pub target_dir: Option<PathBuf>,

    /// Shell startup file to append the PATH export to.
    pub profile: Option<PathBuf>,

    /// Never prefix package-manager commands with `sudo`.
    pub no_sudo: bool,
}

/// Facts about the invoking user that defaults are derived from.
#[derive(Debug, Clone)]
pub struct UserEnvironment {
    /// Home directory, if the platform reports one.
    pub home: Option<PathBuf>,

    /// Login name (`USER` / `LOGNAME`).
    pub login: Option<String>,

    /// Shell detected from `$SHELL`.
    pub shell: ShellType,

    /// Whether the process runs as root.
    pub elevated: bool,
}

impl UserEnvironment {
    /// Probe the current process environment.
    pub fn detect() -> Self {
        Self {
            home: dirs::home_dir(),
            login: login_name(),
            shell: detect_shell(),
            elevated: is_elevated(),
        }
    }

    /// Home directory, falling back to `/home/<login>`.
    pub fn resolved_home(&self) -> Option<PathBuf> {
        self.home.clone().or_else(|| {
            self.login
                .as_ref()
                .map(|login| PathBuf::from("/home").join(login))
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where repositories are cloned and binaries copied.
    pub target_dir: PathBuf,

    /// Shell startup file that receives the PATH export.
    pub profile: PathBuf,

    /// Shell whose syntax the export line uses.
    pub shell: ShellType,

    /// Prefix system package installs with `sudo`.
    pub use_sudo: bool,

    /// User home, used when searching for toolchain binaries.
    pub home: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings against the live process environment.
    pub fn resolve(overrides: &SettingsOverrides) -> Result<Self> {
        Self::resolve_with(overrides, &UserEnvironment::detect())
    }

    /// Resolve settings against an explicit user environment.
    pub fn resolve_with(overrides: &SettingsOverrides, env: &UserEnvironment) -> Result<Self> {
        let home = env.resolved_home();

        let target_dir = match (&overrides.target_dir, &home) {
            (Some(dir), _) => dir.clone(),
            (None, Some(home)) => home.clone(),
            (None, None) => {
                return Err(ArmoryError::TargetDirUnavailable {
                    message: "no home directory and no login name; pass --target-dir".to_string(),
                })
            }
        };

        let profile = match &overrides.profile {
            Some(p) => p.clone(),
            None => env
                .shell
                .profile_file(home.as_deref().unwrap_or(&target_dir)),
        };

        let use_sudo = !overrides.no_sudo && !env.elevated;

        let settings = Self {
            target_dir,
            profile,
            shell: env.shell,
            use_sudo,
            home,
        };
        tracing::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }
}
