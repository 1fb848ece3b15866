//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod dispatcher;
pub mod list;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
