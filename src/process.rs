//! Centralized command execution with consistent error handling.
//!
//! Every external tool the action drives goes through [`CommandRunner`].
//! The system implementation streams each output line to the log as it is
//! produced and captures it for the caller; tests swap in a recording fake.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::CommandError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, `None` if terminated by signal.
    pub status: Option<i32>,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with no output.
    pub fn ok() -> Self {
        Self::exited(0)
    }

    /// A result with the given exit code and no output.
    pub fn exited(code: i32) -> Self {
        Self {
            status: Some(code),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Get the exit code, or -1 if terminated by signal.
    pub fn code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }

    /// Get stdout, trimmed of whitespace.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Get stderr, trimmed of whitespace.
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }

    /// Turn a non-zero exit into [`CommandError::Failed`].
    pub fn into_checked(self, label: &str) -> Result<Self, CommandError> {
        if self.success() {
            return Ok(self);
        }
        Err(CommandError::Failed {
            label: label.to_string(),
            code: self.code(),
            stderr: self.stderr_trimmed().to_string(),
        })
    }
}

/// Description of a single command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    /// Name used when logging output and reporting failure.
    label: Option<String>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            label: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Add a path as an argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the label shown next to output lines and in errors.
    pub fn label(mut self, label: impl AsRef<str>) -> Self {
        self.label = Some(label.as_ref().to_string());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The label, falling back to the program name.
    pub fn get_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.program)
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

/// Executes commands. Blocks until the process exits; there is no timeout.
pub trait CommandRunner {
    /// Run the command. Only a failure to start it is an error; the exit
    /// status is reported in the result.
    fn execute(&self, cmd: &Cmd) -> Result<CommandResult, CommandError>;

    /// Run the command and fail on non-zero exit.
    fn run(&self, cmd: &Cmd) -> Result<CommandResult, CommandError> {
        self.execute(cmd)?.into_checked(cmd.get_label())
    }
}

/// Runs commands on the host, streaming their output to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&self, cmd: &Cmd) -> Result<CommandResult, CommandError> {
        tracing::debug!(command = ?cmd.argv(), "running");

        let spawn_err = |source: std::io::Error| CommandError::Spawn {
            program: cmd.program.clone(),
            source,
        };

        let mut child = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        let label = cmd.get_label();
        let out = child.stdout.take();
        let err = child.stderr.take();
        let (stdout, stderr) = thread::scope(|s| {
            let out = s.spawn(move || stream_lines(label, out));
            let err = s.spawn(move || stream_lines(label, err));
            (
                out.join().unwrap_or_default(),
                err.join().unwrap_or_default(),
            )
        });

        let status = child.wait().map_err(|source| CommandError::Wait {
            program: cmd.program.clone(),
            source,
        })?;

        Ok(CommandResult {
            status: status.code(),
            stdout,
            stderr,
        })
    }
}

/// Log each line of `reader` under `label` and return everything read.
fn stream_lines<R: Read>(label: &str, reader: Option<R>) -> String {
    let Some(reader) = reader else {
        return String::new();
    };

    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                tracing::info!(target: "output", label, "{}", line.trim_end());
                captured.push_str(&line);
            }
        }
    }
    captured
}

/// Check if a program exists in PATH.
///
/// Returns the full path if found, None otherwise.
pub fn which(program: &str) -> Option<String> {
    ::which::which(program)
        .ok()
        .map(|p| p.to_string_lossy().into_owned())
}

// =============================================================================
// Tests
// =============================================================================
