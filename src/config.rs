use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// User settings, read from `<config dir>/favicon/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Screen columns per tab stop.
    pub tab_width: usize,
    /// Lines moved by ctrl-n / ctrl-p.
    pub scroll_speed: usize,
    /// How long status messages stay visible.
    pub status_duration_ms: u64,
    /// Maximum number of undo snapshots kept.
    pub undo_capacity: usize,
    /// Colors for terminals with a light background.
    pub light_theme: bool,
    /// Disable all colors.
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            scroll_speed: 10,
            status_duration_ms: 2700,
            undo_capacity: 8192,
            light_theme: false,
            no_color: false,
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("favicon").join("config.toml"))
    }

    /// Loads the config file (defaults if it does not exist), then applies
    /// `NO_COLOR` and `XTERM_VERSION` from the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::path() {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| crate::Error::io(&path, e))?;
                Self::from_toml(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var_os(key).is_some());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(crate::Error::Config("tab_width must be at least 1".into()));
        }
        if self.undo_capacity == 0 {
            return Err(crate::Error::Config("undo_capacity must be at least 1".into()));
        }
        Ok(())
    }

    fn apply_env(&mut self, is_set: impl Fn(&str) -> bool) {
        if is_set("NO_COLOR") {
            self.no_color = true;
        }
        // xterm reports a dark COLORFGBG even on its white default background
        if is_set("XTERM_VERSION") {
            self.light_theme = true;
        }
    }

    pub fn status_duration(&self) -> Duration {
        Duration::from_millis(self.status_duration_ms)
    }
}
