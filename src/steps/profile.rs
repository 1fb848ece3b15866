//! Shell profile PATH export.
//!
//! The block is appended on every run. Nothing checks whether an earlier
//! run already wrote it, so repeated runs leave duplicate blocks behind.

use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{ArmoryError, Result};
use crate::shell::ShellType;

/// Comment line written above the export.
pub const PATH_COMMENT: &str = "# Add tools to PATH";

/// A PATH export destined for one shell startup file.
#[derive(Debug, Clone)]
pub struct PathExport {
    profile: PathBuf,
    directory: PathBuf,
    shell: ShellType,
}

impl PathExport {
    /// Export `directory` into `profile` using `shell` syntax.
    pub fn new(profile: &Path, directory: &Path, shell: ShellType) -> Self {
        Self {
            profile: profile.to_path_buf(),
            directory: directory.to_path_buf(),
            shell,
        }
    }

    /// The startup file that will be appended to.
    pub fn profile(&self) -> &Path {
        &self.profile
    }

    /// The two lines appended: the comment, then the export.
    pub fn lines(&self) -> [String; 2] {
        [
            PATH_COMMENT.to_string(),
            self.shell.path_export_line(&self.directory),
        ]
    }

    /// Append the block to the profile, creating the file if needed.
    pub fn append(&self) -> Result<()> {
        self.write_block().map_err(|source| ArmoryError::ProfileWrite {
            path: self.profile.clone(),
            source,
        })
    }

    fn write_block(&self) -> std::io::Result<()> {
        if let Some(parent) = self.profile.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.profile)?;

        let mut block = String::new();
        if !ends_with_newline(&mut file)? {
            block.push('\n');
        }
        for line in self.lines() {
            block.push_str(&line);
            block.push('\n');
        }

        file.write_all(block.as_bytes())?;
        tracing::debug!("Appended PATH export to {}", self.profile.display());
        Ok(())
    }
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lines_are_comment_then_export() {
        let export = PathExport::new(
            Path::new("/home/op/.bashrc"),
            Path::new("/home/op"),
            ShellType::Bash,
        );
        let [comment, line] = export.lines();
        assert_eq!(comment, PATH_COMMENT);
        assert_eq!(line, "export PATH=\"$PATH:/home/op\"");
    }

    #[test]
    fn append_creates_missing_profile() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        PathExport::new(&profile, temp.path(), ShellType::Bash)
            .append()
            .unwrap();

        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with(PATH_COMMENT));
    }

    #[test]
    fn append_adds_exactly_two_lines() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        fs::write(&profile, "alias ll='ls -l'\n").unwrap();

        PathExport::new(&profile, temp.path(), ShellType::Bash)
            .append()
            .unwrap();

        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.starts_with("alias ll='ls -l'\n# Add tools to PATH\n"));
    }

    #[test]
    fn append_terminates_unfinished_last_line() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        fs::write(&profile, "export EDITOR=vim").unwrap();

        PathExport::new(&profile, temp.path(), ShellType::Bash)
            .append()
            .unwrap();

        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.lines().next(), Some("export EDITOR=vim"));
    }

    #[test]
    fn repeated_appends_duplicate_the_block() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".bashrc");
        let export = PathExport::new(&profile, temp.path(), ShellType::Bash);

        export.append().unwrap();
        export.append().unwrap();

        let content = fs::read_to_string(&profile).unwrap();
        assert_eq!(content.matches(PATH_COMMENT).count(), 2);
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn append_creates_fish_config_directory() {
        let temp = TempDir::new().unwrap();
        let profile = temp.path().join(".config/fish/config.fish");
        PathExport::new(&profile, Path::new("/opt/tools"), ShellType::Fish)
            .append()
            .unwrap();

        let content = fs::read_to_string(&profile).unwrap();
        assert!(content.contains("set -gx PATH $PATH /opt/tools"));
    }

    #[test]
    fn append_failure_names_profile() {
        let temp = TempDir::new().unwrap();
        // A directory where the profile file should be
        let profile = temp.path().join("rc");
        fs::create_dir(&profile).unwrap();

        let err = PathExport::new(&profile, temp.path(), ShellType::Bash)
            .append()
            .unwrap_err();
        assert!(matches!(err, ArmoryError::ProfileWrite { ref path, .. } if path == &profile));
    }
}
