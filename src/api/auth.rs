//! Saved browser login state.
//!
//! The login capture itself happens in an external browser-automation
//! helper; it leaves a Playwright `storage_state` JSON blob on disk and
//! this module only reads it back: cookies for the gateway domain and
//! the numeric user id the console stashes in localStorage.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AuthState {
    #[serde(default)]
    cookies: Vec<StoredCookie>,
    #[serde(default)]
    origins: Vec<StoredOrigin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoredCookie {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    domain: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoredOrigin {
    #[serde(default)]
    origin: Option<String>,
    #[serde(default, rename = "localStorage")]
    local_storage: Vec<StoredItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoredItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocalUser {
    #[serde(default)]
    id: Option<i64>,
}

impl AuthState {
    /// Read a storage_state file; None on a missing or corrupt file.
    pub(crate) fn load(path: &Path) -> Option<Self> {
        let file = File::open(path).ok()?;
        serde_json::from_reader(file).ok()
    }

    /// Cookie header built from every cookie scoped to the gateway
    /// domain; None when no matching cookie exists (treated as "not
    /// logged in" by callers).
    pub(crate) fn cookie_header(&self, domain_keyword: &str) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter_map(|cookie| {
                let domain = cookie.domain.as_deref()?;
                if !domain.contains(domain_keyword) {
                    return None;
                }
                Some(format!("{}={}", cookie.name.as_deref()?, cookie.value.as_deref()?))
            })
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Numeric user id from the console's `user` localStorage entry,
    /// sent back as the New-Api-User header.
    pub(crate) fn user_id(&self, origin: &str) -> Option<i64> {
        let stored = self
            .origins
            .iter()
            .find(|o| o.origin.as_deref() == Some(origin))?;
        let item = stored
            .local_storage
            .iter()
            .find(|item| item.name.as_deref() == Some("user"))?;
        let user: LocalUser = serde_json::from_str(item.value.as_deref()?).ok()?;
        user.id
    }
}
