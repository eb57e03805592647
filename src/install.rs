//! pacstrap invocation and failure diagnostics.

use std::path::{Path, PathBuf};

use crate::error::{discard, PacstrapError};
use crate::process::{Cmd, CommandRunner};

/// pacman's log inside the target root.
pub const PACMAN_LOG: &str = "var/log/pacman.log";

/// Build `pacstrap -GM -C <config> <root> [package...]`.
///
/// `-G` skips copying the host keyring, `-M` skips the host mirrorlist.
pub fn pacstrap_cmd(program: &str, config: &Path, root: &Path, packages: &[String]) -> Cmd {
    Cmd::new(program)
        .arg("-GM")
        .arg("-C")
        .arg_path(config)
        .arg_path(root)
        .args(packages)
        .label("Pacstrap")
}

/// Path of the installer log for `root`.
pub fn log_path(root: &Path) -> PathBuf {
    root.join(PACMAN_LOG)
}

/// Run pacstrap into `root`.
///
/// On failure the pacman log is dumped as a diagnostic; whatever happens to
/// that dump, the installer's own error is what gets returned.
pub fn install_packages(
    runner: &dyn CommandRunner,
    program: &str,
    config: &Path,
    root: &Path,
    packages: &[String],
) -> Result<(), PacstrapError> {
    if let Err(e) = runner.run(&pacstrap_cmd(program, config, root, packages)) {
        dump_log(runner, root);
        return Err(PacstrapError::PackageInstall(e));
    }
    Ok(())
}

/// Show the pacman log. Best effort; errors are logged and dropped.
fn dump_log(runner: &dyn CommandRunner, root: &Path) {
    let cmd = Cmd::new("cat").arg_path(&log_path(root)).label("pacstrap.log");
    discard("dumping pacman log", runner.run(&cmd));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_packages_ends_at_root() {
        let cmd = pacstrap_cmd("pacstrap", Path::new("/s/pacman.conf"), Path::new("/r"), &[]);
        assert_eq!(cmd.argv(), vec!["pacstrap", "-GM", "-C", "/s/pacman.conf", "/r"]);
    }

    #[test]
    fn test_packages_appended_in_order() {
        let packages = vec!["base".to_string(), "linux".to_string(), "vim".to_string()];
        let cmd = pacstrap_cmd("pacstrap", Path::new("/s/pacman.conf"), Path::new("/r"), &packages);
        assert_eq!(
            cmd.argv(),
            vec!["pacstrap", "-GM", "-C", "/s/pacman.conf", "/r", "base", "linux", "vim"]
        );
    }

    #[test]
    fn test_log_path() {
        assert_eq!(
            log_path(Path::new("/r")),
            PathBuf::from("/r/var/log/pacman.log")
        );
    }
}
