//! Optional TOML configuration for the CLI.
//!
//! Values are read from `--config <PATH>` or, when that flag is absent, from
//! `localizables.toml` in the working directory. Command-line flags always
//! take precedence.
//!
//! ```toml
//! base_language = "en"
//! extension = "strings"
//! jobs = 8
//! dry_run = false
//! ```

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "localizables.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Language used for `Base.lproj` bundles.
    pub base_language: Option<String>,
    /// Resource file extension.
    pub extension: Option<String>,
    /// Maximum number of files merged at once.
    pub jobs: Option<usize>,
    pub dry_run: bool,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid configuration: {}", e))
    }

    /// Loads `explicit` if given, else the default file if it exists.
    pub fn load(explicit: Option<&str>) -> Result<Self, String> {
        match explicit {
            Some(path) => Self::read(Path::new(path)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config '{}': {}", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}
