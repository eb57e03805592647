//! Pacstrap action: provision a target root with pacman-key and pacstrap.
//!
//! Modules are public for integration testing and for embedding the action
//! in a larger build pipeline.

pub mod action;
pub mod config;
pub mod context;
pub mod error;
pub mod install;
pub mod keyring;
pub mod layout;
pub mod logging;
pub mod pacman_conf;
pub mod preflight;
pub mod process;
pub mod recipe;
pub mod timing;

pub use action::{run, Pacstrap, Stage};
pub use config::Settings;
pub use context::ExecutionContext;
pub use error::{CommandError, PacstrapError, RecipeError};
pub use process::{Cmd, CommandResult, CommandRunner, SystemRunner};
pub use recipe::{PacstrapAction, Repository};
