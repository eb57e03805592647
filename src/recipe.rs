//! The pacstrap action record as declared in a recipe.
//!
//! ```yaml
//! action: pacstrap
//! repositories:
//!   - name: core
//!     server: https://mirror.example/$repo/os/$arch
//! packages:
//!   - base
//!   - linux
//! config: pacman.conf   # optional, relative to the recipe directory
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RecipeError;

/// Value of the `action` key this record answers to.
pub const ACTION_NAME: &str = "pacstrap";

/// One package source. Order in the list sets resolution priority.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repository {
    pub name: String,
    pub server: String,
}

impl Repository {
    pub fn new(name: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
        }
    }
}

/// The action's declared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacstrapAction {
    /// Must be [`ACTION_NAME`].
    pub action: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    #[serde(default)]
    pub packages: Vec<String>,
    /// Recipe-relative path of a pacman.conf replacing the generated one.
    #[serde(default, rename = "config")]
    pub override_config: Option<String>,
}

impl PacstrapAction {
    pub fn new(repositories: Vec<Repository>, packages: Vec<String>) -> Self {
        Self {
            action: ACTION_NAME.to_string(),
            repositories,
            packages,
            ..Default::default()
        }
    }

    pub fn with_override_config(mut self, path: impl Into<String>) -> Self {
        self.override_config = Some(path.into());
        self
    }

    /// Parse and verify a YAML action record.
    pub fn from_yaml(text: &str) -> Result<Self, RecipeError> {
        let action: Self = serde_yaml::from_str(text)?;
        action.verify()?;
        Ok(action)
    }

    /// Load and verify an action record from a file.
    pub fn load(path: &Path) -> Result<Self, RecipeError> {
        let text = fs::read_to_string(path).map_err(|source| RecipeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// The override path, treating an empty string as absent.
    pub fn override_config(&self) -> Option<&str> {
        self.override_config.as_deref().filter(|p| !p.is_empty())
    }

    /// Reject records that would corrupt the generated pacman.conf.
    pub fn verify(&self) -> Result<(), RecipeError> {
        if self.action != ACTION_NAME {
            return Err(RecipeError::WrongAction(self.action.clone()));
        }

        for (index, repo) in self.repositories.iter().enumerate() {
            let invalid = |reason: &str| RecipeError::InvalidRepository {
                index,
                reason: reason.to_string(),
            };

            if repo.name.trim().is_empty() {
                return Err(invalid("name is empty"));
            }
            if repo.name.contains(['[', ']', '\n', '\r']) {
                return Err(invalid("name may not contain brackets or line breaks"));
            }
            if repo.server.trim().is_empty() {
                return Err(invalid("server is empty"));
            }
            if repo.server.contains(['\n', '\r']) {
                return Err(invalid("server may not contain line breaks"));
            }
        }

        Ok(())
    }
}
