//! Run configuration.
//!
//! There is no configuration file: the installation catalog is fixed, and
//! the few knobs a run has (target directory, shell profile, sudo) are
//! resolved in [`settings`] from CLI flags, `ARMORY_*` environment
//! variables and the user's home directory.

pub mod settings;

pub use settings::{Settings, SettingsOverrides, UserEnvironment};
