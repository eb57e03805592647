//! pacman.conf synthesis and cleanup.
//!
//! The generated file is parsed by pacman's line-oriented config grammar, so
//! the templates below are reproduced token for token.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::error::{discard, PacstrapError};
use crate::recipe::Repository;

/// File name of the generated config inside the scratch directory.
pub const CONFIG_FILE_NAME: &str = "pacman.conf";

/// Packages pacman refuses to remove without confirmation.
const HOLD_PACKAGES: &str = "pacman glibc";

const SIG_LEVEL: &str = "Required DatabaseOptional TrustAll";

const CONFIG_MODE: u32 = 0o644;

/// Render the `[options]` section for a given target root.
pub fn render_options(root: &Path) -> String {
    let root = root.display();
    format!(
        "\n[options]\n\
         RootDir  = {root}\n\
         CacheDir = {root}/var/cache/pacman/pkg/\n\
         GPGDir   = {root}/etc/pacman.d/gnupg/\n\
         HookDir  = {root}/etc/pacman.d/hooks/\n\
         HoldPkg  = {HOLD_PACKAGES}\n\
         Architecture = auto\n\
         Color\n\
         CheckSpace\n\
         SigLevel = {SIG_LEVEL}\n"
    )
}

/// Render one repository section.
pub fn render_repository(repo: &Repository) -> String {
    format!("\n\n[{}]\nServer = {}\n", repo.name, repo.server)
}

/// Render the whole config: options, then one section per repository in order.
pub fn render_config(root: &Path, repositories: &[Repository]) -> String {
    let mut out = render_options(root);
    for repo in repositories {
        out.push_str(&render_repository(repo));
    }
    out
}

/// Write the synthesized config to `path`, replacing any previous content.
pub fn write_config(
    path: &Path,
    root: &Path,
    repositories: &[Repository],
) -> Result<(), PacstrapError> {
    let write = || -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(CONFIG_MODE)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(render_config(root, repositories).as_bytes())?;
        writer.into_inner().map_err(|e| e.into_error())?;
        Ok(())
    };

    write().map_err(|source| PacstrapError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace the config at `dest` with a byte-for-byte copy of `src`.
pub fn copy_override(src: &Path, dest: &Path) -> Result<(), PacstrapError> {
    let copy = || -> io::Result<()> {
        let content = fs::read(src)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(CONFIG_MODE)
            .open(dest)?;
        file.write_all(&content)?;
        Ok(())
    };

    copy().map_err(|source| PacstrapError::ConfigCopy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    })
}

/// Produce the config the rest of the action consumes.
///
/// The synthesized file is always written first; an override then replaces
/// it wholesale, never merging with it.
pub fn synthesize(
    path: &Path,
    root: &Path,
    repositories: &[Repository],
    override_src: Option<&Path>,
) -> Result<(), PacstrapError> {
    write_config(path, root, repositories)?;
    tracing::debug!(
        path = %path.display(),
        repositories = repositories.len(),
        "wrote pacman config"
    );

    if let Some(src) = override_src {
        tracing::info!("Using pacman config from {}", src.display());
        copy_override(src, path)?;
    }
    Ok(())
}

/// Delete the generated config. Failure is logged and ignored.
pub fn remove_config(path: &Path) {
    if discard("removing pacman config", fs::remove_file(path)).is_some() {
        tracing::debug!(path = %path.display(), "removed pacman config");
    }
}
