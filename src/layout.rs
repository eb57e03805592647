//! Directory skeleton pacman-key needs inside the target root.

use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use crate::error::PacstrapError;

/// Directories created under the target root, in creation order.
pub const LAYOUT_DIRS: &[&str] = &["var/lib/pacman", "etc/pacman.d/gnupg"];

const DIR_MODE: u32 = 0o755;

/// Create every directory in [`LAYOUT_DIRS`] under `root`.
///
/// Existing directories are fine.
pub fn create_layout(root: &Path) -> Result<(), PacstrapError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true).mode(DIR_MODE);

    for dir in LAYOUT_DIRS {
        let path = root.join(dir);
        builder
            .create(&path)
            .map_err(|source| PacstrapError::DirectoryCreate { path, source })?;
    }
    Ok(())
}
