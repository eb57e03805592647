//! pacstrap-action - build a root filesystem with pacstrap.
//!
//! Reads a single `action: pacstrap` record, writes a pacman.conf for it,
//! sets up the keyring and runs pacstrap into the given root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pacstrap_action::{
    logging, pacman_conf, preflight, ExecutionContext, Pacstrap, PacstrapAction, Settings,
    SystemRunner,
};

#[derive(Parser)]
#[command(name = "pacstrap-action")]
#[command(about = "Provision a root filesystem with pacman-key and pacstrap")]
#[command(
    after_help = "QUICK START:\n  pacstrap-action preflight                     Check host tools\n  pacstrap-action render action.yaml -r ROOT    Print generated pacman.conf\n  pacstrap-action run action.yaml -r ROOT -s DIR Build the root filesystem"
)]
struct Cli {
    /// More output (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Less output (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the action (config, layout, keyring, pacstrap, cleanup)
    Run {
        /// Action record (YAML)
        recipe: PathBuf,
        /// Root filesystem to provision
        #[arg(short, long)]
        rootdir: PathBuf,
        /// Scratch directory for the generated pacman.conf
        #[arg(short, long)]
        scratchdir: PathBuf,
        /// Base for the `config` path (default: directory of RECIPE)
        #[arg(long)]
        recipedir: Option<PathBuf>,
        /// Don't check host tools first
        #[arg(long)]
        skip_preflight: bool,
    },

    /// Print the generated pacman.conf without touching anything
    Render {
        /// Action record (YAML)
        recipe: PathBuf,
        /// Root filesystem the config would point at
        #[arg(short, long)]
        rootdir: PathBuf,
    },

    /// Check host tools
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show current configuration
    Config,
}

fn recipe_parent(recipe: &Path) -> PathBuf {
    recipe
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn load_action(recipe: &Path) -> Result<PacstrapAction> {
    PacstrapAction::load(recipe).with_context(|| format!("loading {}", recipe.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let settings = Settings::load();
    let cwd = std::env::current_dir().context("Couldn't determine current directory")?;

    match cli.command {
        Commands::Run {
            recipe,
            rootdir,
            scratchdir,
            recipedir,
            skip_preflight,
        } => {
            let action = load_action(&recipe)?;
            let recipedir = recipedir.unwrap_or_else(|| recipe_parent(&recipe));
            let ctx = ExecutionContext::new(rootdir, scratchdir, recipedir).absolutize(&cwd);

            let pacstrap = Pacstrap::new(&action, &ctx, &settings, &SystemRunner);
            if skip_preflight {
                pacstrap.run()?;
            } else {
                pacstrap.run_after_preflight()?;
            }
            tracing::info!("Pacstrap finished: {}", ctx.target_root.display());
        }

        Commands::Render { recipe, rootdir } => {
            let action = load_action(&recipe)?;
            let ctx = ExecutionContext::new(rootdir, &cwd, &cwd).absolutize(&cwd);
            ctx.check_paths()?;
            print!(
                "{}",
                pacman_conf::render_config(&ctx.target_root, &action.repositories)
            );
        }

        Commands::Preflight { strict } => {
            if strict {
                preflight::run_preflight_or_fail(&settings)?;
            } else {
                let report = preflight::run_preflight(&settings);
                report.print();
                if !report.all_passed() {
                    println!("Some checks failed. Use --strict to fail.");
                }
            }
        }

        Commands::Config => settings.print(),
    }

    Ok(())
}
