//! External process execution and shell environment detection.

pub mod command;
pub mod mock;
pub mod path;
pub mod platform;

pub use command::{CommandLine, CommandResult, CommandRunner, SystemRunner};
pub use mock::MockRunner;
pub use path::{is_executable, parse_system_path, resolve_tool_path};
pub use platform::{detect_shell, is_ci, is_elevated, login_name, ShellType};
