//! Log filter setup for the binary.
//!
//! `RUST_LOG` decides the level; `info` applies when it is unset. `-v` and
//! `-q` override whatever global level `RUST_LOG` asked for, while leaving
//! its per-target directives alone.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level forced by the command-line flags, if any.
pub fn flag_level(verbose: bool, quiet: bool) -> Option<LevelFilter> {
    if verbose {
        Some(LevelFilter::DEBUG)
    } else if quiet {
        Some(LevelFilter::WARN)
    } else {
        None
    }
}

/// Build the filter from flags and a `RUST_LOG`-style spec.
pub fn filter(verbose: bool, quiet: bool, spec: Option<&str>) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec.unwrap_or_default());

    match flag_level(verbose, quiet) {
        Some(level) => filter.add_directive(level.into()),
        None => filter,
    }
}

/// Install the global fmt subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, quiet, spec.as_deref()))
        .with_target(false)
        .init();
}
