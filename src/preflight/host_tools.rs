//! Host tool availability checks.

use crate::config::Settings;
use crate::process;

use super::types::CheckResult;

/// Check host tools are installed.
pub fn check_host_tools(settings: &Settings) -> Vec<CheckResult> {
    let required_tools = [
        (
            settings.pacman_key.as_str(),
            "pacman",
            "Required to set up the keyring",
        ),
        (
            settings.pacstrap.as_str(),
            "arch-install-scripts",
            "Required to install packages",
        ),
    ];

    let mut results: Vec<CheckResult> = required_tools
        .into_iter()
        .map(|(tool, package, purpose)| check_tool_exists(tool, package, purpose, true))
        .collect();

    // Only used to show pacman.log when pacstrap fails
    results.push(check_tool_exists(
        "cat",
        "coreutils",
        "Used to show pacman.log on failure",
        false,
    ));

    results
}

/// Check if a tool exists in PATH.
fn check_tool_exists(tool: &str, package: &str, purpose: &str, required: bool) -> CheckResult {
    match process::which(tool) {
        Some(path) => CheckResult::pass_with(tool, &path),
        None => {
            let msg = format!("Not found. Install '{}' package. {}", package, purpose);
            if required {
                CheckResult::fail(tool, &msg)
            } else {
                CheckResult::warn(tool, &msg)
            }
        }
    }
}
