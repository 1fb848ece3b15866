//! Platform-specific shell and user detection.

use std::path::{Path, PathBuf};

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            _ => ShellType::Unknown,
        }
    }

    /// The startup file PATH changes are appended to, relative to `home`.
    ///
    /// Unknown shells get `.bashrc`.
    pub fn profile_file(&self, home: &Path) -> PathBuf {
        match self {
            ShellType::Zsh => home.join(".zshrc"),
            ShellType::Fish => home.join(".config").join("fish").join("config.fish"),
            ShellType::Bash | ShellType::Unknown => home.join(".bashrc"),
        }
    }

    /// A line that appends `dir` to PATH in this shell's syntax.
    pub fn path_export_line(&self, dir: &Path) -> String {
        match self {
            ShellType::Fish => format!("set -gx PATH $PATH {}", dir.display()),
            _ => format!("export PATH=\"$PATH:{}\"", dir.display()),
        }
    }
}

/// Detect the user's shell from `$SHELL`.
pub fn detect_shell() -> ShellType {
    std::env::var("SHELL")
        .map(|s| ShellType::from_executable(&s))
        .unwrap_or(ShellType::Unknown)
}

/// The invoking user's login name, from `USER` or `LOGNAME`.
pub fn login_name() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}
