//! Execution context handed to the action by the surrounding pipeline.
//!
//! Provides the three paths the action reads from and writes into.

use std::path::{Component, Path, PathBuf};

use crate::error::PacstrapError;

/// Paths the action operates on. Read-only from the action's point of view.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Filesystem root being provisioned.
    pub target_root: PathBuf,
    /// Writable working area for action-local artifacts.
    pub scratch_dir: PathBuf,
    /// Base for resolving recipe-relative paths.
    pub recipe_dir: PathBuf,
}

impl ExecutionContext {
    pub fn new(
        target_root: impl Into<PathBuf>,
        scratch_dir: impl Into<PathBuf>,
        recipe_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target_root: target_root.into(),
            scratch_dir: scratch_dir.into(),
            recipe_dir: recipe_dir.into(),
        }
    }

    /// Make every path absolute against `cwd`.
    ///
    /// The target root ends up inside the generated pacman.conf and on the
    /// pacstrap command line, both of which run relative to other directories.
    pub fn absolutize(self, cwd: &Path) -> Self {
        let abs = |p: PathBuf| if p.is_absolute() { p } else { cwd.join(p) };
        Self {
            target_root: abs(self.target_root),
            scratch_dir: abs(self.scratch_dir),
            recipe_dir: abs(self.recipe_dir),
        }
    }

    /// Location of the generated pacman configuration.
    pub fn config_path(&self) -> PathBuf {
        self.scratch_dir.join(crate::pacman_conf::CONFIG_FILE_NAME)
    }

    /// Resolve a recipe-relative path.
    ///
    /// A leading `/` does not escape the recipe directory: `/etc/pacman.conf`
    /// resolves to `<recipe_dir>/etc/pacman.conf`.
    pub fn recipe_path(&self, relative: &str) -> PathBuf {
        let mut path = self.recipe_dir.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
                other => path.push(other),
            }
        }
        path
    }

    /// Reject paths that would be mangled on their way into pacman.conf or
    /// onto a command line.
    pub fn check_paths(&self) -> Result<(), PacstrapError> {
        for path in [&self.target_root, &self.scratch_dir] {
            if path.to_str().is_none() {
                return Err(PacstrapError::NonUtf8Path { path: path.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_in_scratch() {
        let ctx = ExecutionContext::new("/root", "/scratch", "/recipes");
        assert_eq!(ctx.config_path(), PathBuf::from("/scratch/pacman.conf"));
        assert_eq!(
            ctx.recipe_path("conf/pacman.conf"),
            PathBuf::from("/recipes/conf/pacman.conf")
        );
    }

    #[test]
    fn test_absolute_recipe_path_stays_in_recipe_dir() {
        let ctx = ExecutionContext::new("/root", "/scratch", "/recipes");
        assert_eq!(
            ctx.recipe_path("/etc/pacman.conf"),
            PathBuf::from("/recipes/etc/pacman.conf")
        );
        assert_eq!(
            ctx.recipe_path("./conf/pacman.conf"),
            PathBuf::from("/recipes/conf/pacman.conf")
        );
    }

    #[test]
    fn test_non_utf8_root_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = PathBuf::from(OsStr::from_bytes(b"/build/r\xffoot"));
        let ctx = ExecutionContext::new(root, "/scratch", "/recipes");
        let err = ctx.check_paths().unwrap_err();
        assert!(matches!(err, PacstrapError::NonUtf8Path { .. }));

        let ok = ExecutionContext::new("/build/root", "/scratch", "/recipes");
        assert!(ok.check_paths().is_ok());
    }

    #[test]
    fn test_absolutize_keeps_absolute_paths() {
        let ctx = ExecutionContext::new("rootfs", "/tmp/scratch", "recipes")
            .absolutize(Path::new("/work"));
        assert_eq!(ctx.target_root, PathBuf::from("/work/rootfs"));
        assert_eq!(ctx.scratch_dir, PathBuf::from("/tmp/scratch"));
        assert_eq!(ctx.recipe_dir, PathBuf::from("/work/recipes"));
    }
}
