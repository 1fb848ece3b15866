//! Installation run orchestration.

pub mod workflow;

pub use workflow::{Orchestrator, RunSummary};
