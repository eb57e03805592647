//! Shared test utilities for pacstrap-action tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use pacstrap_action::{
    Cmd, CommandError, CommandResult, CommandRunner, ExecutionContext, Settings,
};
use tempfile::TempDir;

/// Test environment with temporary target root, scratch and recipe directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub scratch: PathBuf,
    pub recipes: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let root = base.join("rootfs");
        let scratch = base.join("scratch");
        let recipes = base.join("recipes");
        for dir in [&root, &scratch, &recipes] {
            fs::create_dir_all(dir).expect("Failed to create test dir");
        }

        Self {
            _temp_dir: temp_dir,
            root,
            scratch,
            recipes,
        }
    }

    pub fn context(&self) -> ExecutionContext {
        ExecutionContext::new(&self.root, &self.scratch, &self.recipes)
    }

    pub fn config_path(&self) -> PathBuf {
        self.scratch.join("pacman.conf")
    }
}

/// Settings with the stock program names.
pub fn settings() -> Settings {
    Settings::default()
}

/// One command seen by [`RecordingRunner`].
#[derive(Debug, Clone)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub label: String,
    /// Content of the watched config file when the command ran, if it existed.
    pub config: Option<String>,
}

type Matcher = Box<dyn Fn(&Cmd) -> bool>;

/// Fake runner recording every command instead of executing it.
pub struct RecordingRunner {
    watch: PathBuf,
    failures: Vec<(Matcher, i32)>,
    spawn_failures: Vec<Matcher>,
    pub calls: RefCell<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Record commands, snapshotting the config at `watch` on each call.
    pub fn new(watch: PathBuf) -> Self {
        Self {
            watch,
            failures: Vec::new(),
            spawn_failures: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make commands matching `f` exit with `code`.
    pub fn fail_when(mut self, code: i32, f: impl Fn(&Cmd) -> bool + 'static) -> Self {
        self.failures.push((Box::new(f), code));
        self
    }

    /// Make commands matching `f` fail to start.
    pub fn unspawnable_when(mut self, f: impl Fn(&Cmd) -> bool + 'static) -> Self {
        self.spawn_failures.push(Box::new(f));
        self
    }

    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|c| c.argv.clone()).collect()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.argv[0].clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, cmd: &Cmd) -> Result<CommandResult, CommandError> {
        self.calls.borrow_mut().push(Invocation {
            argv: cmd.argv().into_iter().map(String::from).collect(),
            label: cmd.get_label().to_string(),
            config: fs::read_to_string(&self.watch).ok(),
        });

        if self.spawn_failures.iter().any(|f| f(cmd)) {
            return Err(CommandError::Spawn {
                program: cmd.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        for (matches, code) in &self.failures {
            if matches(cmd) {
                return Ok(CommandResult {
                    status: Some(*code),
                    stdout: String::new(),
                    stderr: format!("{} exploded", cmd.program()),
                });
            }
        }
        Ok(CommandResult::ok())
    }
}

/// Matches a command by program name and last argument.
pub fn is(program: &'static str, last: &'static str) -> impl Fn(&Cmd) -> bool {
    move |cmd| {
        cmd.program() == program && cmd.get_args().last().map(String::as_str) == Some(last)
    }
}

/// Matches a command by program name.
pub fn program(program: &'static str) -> impl Fn(&Cmd) -> bool {
    move |cmd| cmd.program() == program
}
