//! The pacstrap action: five stages run strictly in order.
//!
//! `Config -> Layout -> Keyring -> Install -> Cleanup`. The first failing
//! stage aborts the rest and its error is returned as-is. Nothing is rolled
//! back; a failed run leaves the target root and the scratch config as the
//! last successful stage left them.

use std::fmt;
use std::path::PathBuf;

use crate::config::Settings;
use crate::context::ExecutionContext;
use crate::error::PacstrapError;
use crate::process::CommandRunner;
use crate::recipe::PacstrapAction;
use crate::timing::StageTimer;
use crate::{install, keyring, layout, pacman_conf, preflight};

/// One step of the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Generate (or copy) pacman.conf into the scratch directory.
    Config,
    /// Create the directories pacman-key expects in the target root.
    Layout,
    /// `pacman-key --init`, then `--populate`.
    Keyring,
    /// `pacstrap` into the target root.
    Install,
    /// Remove the generated config.
    Cleanup,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Config,
        Stage::Layout,
        Stage::Keyring,
        Stage::Install,
        Stage::Cleanup,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Stage::Config => "Writing pacman config",
            Stage::Layout => "Creating pacman layout",
            Stage::Keyring => "Initializing pacman keyring",
            Stage::Install => "Running pacstrap",
            Stage::Cleanup => "Removing pacman config",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Layout => "layout",
            Stage::Keyring => "keyring",
            Stage::Install => "install",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// A configured run of the action.
pub struct Pacstrap<'a> {
    action: &'a PacstrapAction,
    ctx: &'a ExecutionContext,
    settings: &'a Settings,
    runner: &'a dyn CommandRunner,
}

impl<'a> Pacstrap<'a> {
    pub fn new(
        action: &'a PacstrapAction,
        ctx: &'a ExecutionContext,
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            action,
            ctx,
            settings,
            runner,
        }
    }

    fn override_source(&self) -> Option<PathBuf> {
        self.action
            .override_config()
            .map(|p| self.ctx.recipe_path(p))
    }

    /// Run a single stage.
    pub fn step(&self, stage: Stage) -> Result<(), PacstrapError> {
        let config = self.ctx.config_path();
        let root = &self.ctx.target_root;

        match stage {
            Stage::Config => pacman_conf::synthesize(
                &config,
                root,
                &self.action.repositories,
                self.override_source().as_deref(),
            ),
            Stage::Layout => layout::create_layout(root),
            Stage::Keyring => {
                keyring::init_keyring(self.runner, &self.settings.pacman_key, &config)
            }
            Stage::Install => install::install_packages(
                self.runner,
                &self.settings.pacstrap,
                &config,
                root,
                &self.action.packages,
            ),
            Stage::Cleanup => {
                pacman_conf::remove_config(&config);
                Ok(())
            }
        }
    }

    /// Check host tools, then run. Nothing is written if a tool is missing.
    pub fn run_after_preflight(&self) -> anyhow::Result<()> {
        preflight::run_preflight_or_fail(self.settings)?;
        self.run()?;
        Ok(())
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(&self) -> Result<(), PacstrapError> {
        self.ctx.check_paths()?;

        match &self.action.description {
            Some(desc) => tracing::info!("==> Pacstrap: {}", desc),
            None => tracing::info!("==> Pacstrap"),
        }

        Stage::ALL.into_iter().try_for_each(|stage| {
            let timer = StageTimer::start(stage);
            self.step(stage).inspect_err(|e| {
                tracing::error!(%stage, "{}", e);
            })?;
            timer.finish();
            Ok(())
        })
    }
}

/// Run the action against `ctx`.
pub fn run(
    action: &PacstrapAction,
    ctx: &ExecutionContext,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> Result<(), PacstrapError> {
    Pacstrap::new(action, ctx, settings, runner).run()
}
