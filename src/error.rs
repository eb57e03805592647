//! Error kinds for the pacstrap action.
//!
//! Every variant of [`PacstrapError`] is fatal: the action stops at the
//! first one and hands it back to the caller. The only failures that never
//! escalate go through [`discard`].

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of one of the action's steps.
#[derive(Debug, Error)]
pub enum PacstrapError {
    #[error("couldn't write pacman config {}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't copy pacman config {} to {}", from.display(), to.display())]
    ConfigCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't create {} in image", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("couldn't init pacman keyring")]
    KeyringInit(#[source] CommandError),

    #[error("couldn't populate pacman keyring")]
    KeyringPopulate(#[source] CommandError),

    /// The installer's own error, passed through untouched.
    #[error(transparent)]
    PackageInstall(CommandError),
}

/// Failure of a single external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to execute '{program}'. Is it installed?")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("couldn't wait for '{program}'")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{label} failed (exit code {code})")]
    Failed {
        label: String,
        /// Exit code, or -1 if terminated by signal.
        code: i32,
        stderr: String,
    },
}

/// Failure to load or verify an action record.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("couldn't read recipe {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse recipe")]
    Parse(#[from] serde_yaml::Error),

    #[error("expected action 'pacstrap', found '{0}'")]
    WrongAction(String),

    #[error("invalid repository #{index}: {reason}")]
    InvalidRepository { index: usize, reason: String },
}

/// Attempt-and-discard: log a failed best-effort operation and move on.
///
/// The error never reaches the caller, so it cannot mask or replace an
/// error that is already being propagated.
pub fn discard<T, E: Display>(what: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("{} failed (ignored): {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_discard_passes_value_through() {
        let r: Result<u32, io::Error> = Ok(7);
        assert_eq!(discard("thing", r), Some(7));
    }

    #[test]
    fn test_discard_swallows_error() {
        let r: Result<u32, io::Error> = Err(io::Error::other("boom"));
        assert_eq!(discard("thing", r), None);
    }

    #[test]
    fn test_package_install_is_transparent() {
        let inner = CommandError::Failed {
            label: "Pacstrap".to_string(),
            code: 1,
            stderr: String::new(),
        };
        let expected = inner.to_string();
        let err = PacstrapError::PackageInstall(inner);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_wait_failure_is_not_reported_as_missing_program() {
        let err = CommandError::Wait {
            program: "pacstrap".to_string(),
            source: io::Error::other("interrupted"),
        };
        let msg = err.to_string();
        assert!(msg.contains("wait for 'pacstrap'"));
        assert!(!msg.contains("installed"));
    }

    #[test]
    fn test_keyring_error_keeps_source() {
        let err = PacstrapError::KeyringInit(CommandError::Failed {
            label: "Pacman-key".to_string(),
            code: 2,
            stderr: "no".to_string(),
        });
        assert_eq!(err.to_string(), "couldn't init pacman keyring");
        let source = err.source().expect("source should be kept");
        assert!(source.to_string().contains("exit code 2"));
    }
}
