use crate::controller::ControllerSettings;
use crate::model::RoleMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Per-role selector overrides; roles left out keep their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleMap>,
    /// File name of the persisted UI state, relative to the config dir
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

fn default_toast_duration_ms() -> u64 {
    3000
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_state_file() -> String {
    "state.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            roles: None,
            state_file: default_state_file(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".counselflow-ui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Option<Config> {
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Load the config, writing the defaults first if no file exists yet
    ///
    /// An unreadable file is left untouched and the defaults are used.
    pub fn load_or_create(config_path: &Path) -> anyhow::Result<Config> {
        if config_path.exists() {
            return Ok(Self::load_from(config_path).unwrap_or_default());
        }
        let config = Config::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)?;

        Ok(())
    }

    pub fn state_path(&self) -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(&self.state_file))
    }

    pub fn settings(&self) -> ControllerSettings {
        ControllerSettings {
            toast_duration: Duration::from_millis(self.toast_duration_ms),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    /// Defaults merged with any configured overrides
    pub fn role_map(&self) -> RoleMap {
        match &self.roles {
            Some(overrides) => RoleMap::with_overrides(overrides),
            None => RoleMap::default(),
        }
    }
}
