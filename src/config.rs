//! Host settings for the action.
//!
//! Read from environment variables, with a `.env` file in the current
//! directory filling in anything the environment leaves unset.

/// Default program used for keyring management.
pub const DEFAULT_PACMAN_KEY: &str = "pacman-key";
/// Default bootstrap installer.
pub const DEFAULT_PACSTRAP: &str = "pacstrap";

/// Programs the action invokes on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Keyring tool (env `PACMAN_KEY`).
    pub pacman_key: String,
    /// Bootstrap installer (env `PACSTRAP`).
    pub pacstrap: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pacman_key: DEFAULT_PACMAN_KEY.to_string(),
            pacstrap: DEFAULT_PACSTRAP.to_string(),
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            pacman_key: get("PACMAN_KEY", DEFAULT_PACMAN_KEY),
            pacstrap: get("PACSTRAP", DEFAULT_PACSTRAP),
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  PACMAN_KEY: {}", self.pacman_key);
        println!("  PACSTRAP: {}", self.pacstrap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn test_lookup_overrides_and_ignores_blank() {
        let vars = HashMap::from([
            ("PACSTRAP", "/opt/bin/pacstrap".to_string()),
            ("PACMAN_KEY", "  ".to_string()),
        ]);
        let settings = Settings::from_lookup(|k| vars.get(k).cloned());
        assert_eq!(settings.pacstrap, "/opt/bin/pacstrap");
        assert_eq!(settings.pacman_key, DEFAULT_PACMAN_KEY);
    }

    #[test]
    #[serial]
    fn test_load_reads_environment() {
        std::env::set_var("PACMAN_KEY", "/usr/local/bin/pacman-key");
        let settings = Settings::load();
        std::env::remove_var("PACMAN_KEY");

        assert_eq!(settings.pacman_key, "/usr/local/bin/pacman-key");
    }
}
