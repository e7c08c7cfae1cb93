use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::store::paths::config_dir;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) offline: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<String>,
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) days: Option<i64>,
    #[serde(default)]
    pub(crate) auth_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. ~/.config/gatecost/config.toml (or $GATECOST_HOME/config.toml)
        if let Some(dir) = config_dir() {
            paths.push(dir.join("config.toml"));
        }

        // 2. Home directory: ~/.gatecost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gatecost.toml"));
        }

        paths
    }
}
