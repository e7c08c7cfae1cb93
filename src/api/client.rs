//! HTTP client for the gateway console.
//!
//! Every fetch returns `Option`: None is the single "unavailable"
//! signal covering transport failure, non-2xx status, bad JSON, and
//! `success: false` envelopes. Callers decide whether that degrades the
//! output or aborts the command; no retries happen here.

use std::time::Duration;

use crate::api::auth::AuthState;
use crate::api::types::{ApiEnvelope, PricingPayload, UserInfo};
use crate::core::UsageRecord;

pub(crate) struct ConsoleClient {
    agent: ureq::Agent,
    base_url: String,
    domain: String,
}

/// Host portion of a base URL, used as the cookie domain keyword.
fn host_of(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map_or(base_url, |(_, rest)| rest);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

impl ConsoleClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        let base_url = base_url.trim_end_matches('/').to_string();
        let domain = host_of(&base_url);
        Self {
            agent,
            base_url,
            domain,
        }
    }

    /// GET /api/pricing. Public endpoint; the raw payload is returned
    /// so it can be persisted verbatim in the price history.
    pub(crate) fn fetch_pricing(&self) -> Option<serde_json::Value> {
        let url = format!("{}/api/pricing", self.base_url);
        let response = self.agent.get(&url).call().ok()?;
        let mut body = response.into_body();
        let value: serde_json::Value = serde_json::from_reader(body.as_reader()).ok()?;
        if !value
            .get("success")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
        {
            return None;
        }
        Some(value)
    }

    /// GET /api/pricing, parsed.
    pub(crate) fn fetch_pricing_parsed(&self) -> Option<(serde_json::Value, PricingPayload)> {
        let value = self.fetch_pricing()?;
        let payload = PricingPayload::from_value(&value)?;
        Some((value, payload))
    }

    /// GET /api/user/self. Identity and balance; requires login state.
    pub(crate) fn fetch_user_self(&self, auth: &AuthState) -> Option<UserInfo> {
        let url = format!("{}/api/user/self", self.base_url);
        let envelope: ApiEnvelope<UserInfo> = self.get_authed(&url, auth, &[])?;
        if !envelope.success {
            return None;
        }
        envelope.data
    }

    /// GET /api/data/self over a half-open epoch-seconds window. A
    /// successful response with no records is an empty list, not None.
    pub(crate) fn fetch_usage(
        &self,
        auth: &AuthState,
        start_timestamp: i64,
        end_timestamp: i64,
    ) -> Option<Vec<UsageRecord>> {
        let url = format!("{}/api/data/self", self.base_url);
        let query = [
            ("start_timestamp", start_timestamp.to_string()),
            ("end_timestamp", end_timestamp.to_string()),
            ("default_time", "day".to_string()),
        ];
        let envelope: ApiEnvelope<Vec<UsageRecord>> = self.get_authed(&url, auth, &query)?;
        if !envelope.success {
            return None;
        }
        Some(envelope.data.unwrap_or_default())
    }

    fn get_authed<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        auth: &AuthState,
        query: &[(&str, String)],
    ) -> Option<T> {
        let cookie = auth.cookie_header(&self.domain)?;
        let referer = format!("{}/console", self.base_url);
        let mut request = self
            .agent
            .get(url)
            .header("Cookie", cookie.as_str())
            .header("User-Agent", "Mozilla/5.0")
            .header("Accept", "application/json")
            .header("Referer", referer.as_str())
            .header("Origin", self.base_url.as_str());
        if let Some(user_id) = auth.user_id(&self.base_url) {
            request = request.header("New-Api-User", user_id.to_string().as_str());
        }
        for (key, value) in query {
            request = request.query(*key, value.as_str());
        }
        let response = request.call().ok()?;
        let mut body = response.into_body();
        serde_json::from_reader(body.as_reader()).ok()
    }
}
