//! The fixed installation catalog.

use crate::error::{ArmoryError, Result};

use super::step::{SetupWhen, Step};

/// Module path passed to `go install` for asnmap.
pub const ASNMAP_MODULE: &str = "github.com/projectdiscovery/asnmap/cmd/asnmap@latest";

/// The steps a run performs, in execution order.
pub fn default_catalog() -> Vec<Step> {
    vec![
        Step::system_package("python3-venv"),
        Step::system_package("python3-poetry"),
        Step::python_package("pwncat-cs"),
        // poetry install runs even when the checkout is already there
        Step::repository("pwncat", "https://github.com/calebstewart/pwncat")
            .with_setup("poetry install", SetupWhen::Always),
        Step::toolchain("asnmap", ASNMAP_MODULE, "asnmap"),
        Step::repository("routersploit", "https://github.com/threat9/routersploit")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone),
        Step::repository(
            "cerbrutus",
            "https://github.com/Cerbrutus-BruteForcer/cerbrutus",
        ),
        Step::repository("g2l", "https://github.com/biskit069/g2l")
            .with_setup("python3 setup.py install", SetupWhen::AfterClone),
    ]
}

/// Filter `steps` by `--only` and `--skip`, keeping catalog order.
///
/// Every name in either list must exist in `steps`.
pub fn select_steps(steps: Vec<Step>, only: &[String], skip: &[String]) -> Result<Vec<Step>> {
    if let Some(unknown) = only
        .iter()
        .chain(skip.iter())
        .find(|name| !steps.iter().any(|s| &s.name == *name))
    {
        return Err(ArmoryError::UnknownStep {
            name: unknown.clone(),
        });
    }

    Ok(steps
        .into_iter()
        .filter(|s| only.is_empty() || only.contains(&s.name))
        .filter(|s| !skip.contains(&s.name))
        .collect())
}
