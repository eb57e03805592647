//! Preflight checks for the pacstrap action.
//!
//! Verifies the host tools the action shells out to before any file is
//! touched. Run with `pacstrap-action preflight` to check by hand.

mod host_tools;
mod types;

use anyhow::{bail, Result};

use crate::config::Settings;

pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
pub fn run_preflight(settings: &Settings) -> PreflightReport {
    tracing::info!("Checking host tools...");
    PreflightReport {
        checks: host_tools::check_host_tools(settings),
    }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(settings: &Settings) -> Result<()> {
    let report = run_preflight(settings);

    if !report.all_passed() {
        report.print();
        bail!(
            "Preflight failed: {} check(s) failed. Install the missing tools first.",
            report.fail_count()
        );
    }

    tracing::info!("All preflight checks passed");
    Ok(())
}
