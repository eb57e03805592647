//! pacman-key invocations.

use std::path::Path;

use crate::error::PacstrapError;
use crate::process::{Cmd, CommandRunner};

const LABEL: &str = "Pacman-key";

/// Build a `pacman-key --nocolor --config <path> <operation>` command.
pub fn pacman_key_cmd(program: &str, config: &Path, operation: &str) -> Cmd {
    Cmd::new(program)
        .arg("--nocolor")
        .arg("--config")
        .arg_path(config)
        .arg(operation)
        .label(LABEL)
}

/// Initialize the keyring, then populate it. Populate never runs if init failed.
pub fn init_keyring(
    runner: &dyn CommandRunner,
    program: &str,
    config: &Path,
) -> Result<(), PacstrapError> {
    runner
        .run(&pacman_key_cmd(program, config, "--init"))
        .map_err(PacstrapError::KeyringInit)?;

    runner
        .run(&pacman_key_cmd(program, config, "--populate"))
        .map_err(PacstrapError::KeyringPopulate)?;

    Ok(())
}
