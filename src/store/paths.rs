//! On-disk locations for config, login state, and cached payloads.

use std::path::PathBuf;

/// Single-directory override for tests and scripted setups.
fn home_override() -> Option<PathBuf> {
    std::env::var_os("GATECOST_HOME").map(PathBuf::from)
}

/// Config material: config.toml, auth_state.json, model_capabilities.json.
pub(crate) fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = home_override() {
        return Some(dir);
    }
    dirs::home_dir().map(|home| home.join(".config").join("gatecost"))
}

/// Cached payloads: price_history.json, balance.json.
pub(crate) fn cache_dir() -> Option<PathBuf> {
    if let Some(dir) = home_override() {
        return Some(dir);
    }
    dirs::home_dir().map(|home| home.join(".cache").join("gatecost"))
}

pub(crate) fn history_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("price_history.json"))
}

pub(crate) fn balance_snapshot_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("balance.json"))
}

pub(crate) fn auth_state_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("auth_state.json"))
}

pub(crate) fn capability_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("model_capabilities.json"))
}
