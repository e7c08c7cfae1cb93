//! Wire types for the gateway console endpoints.

use std::collections::HashMap;

use serde::Deserialize;

use crate::consts::{DEFAULT_GROUP_RATIO, QUOTA_PER_USD};
use crate::core::RateCardEntry;

/// Envelope every authenticated console endpoint wraps its data in.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) data: Option<T>,
}

/// Parsed /api/pricing payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PricingPayload {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) data: Vec<RateCardEntry>,
    #[serde(default)]
    pub(crate) group_ratio: HashMap<String, f64>,
}

impl PricingPayload {
    /// Discount for the "default" tier; 0.23 when the payload omits it.
    pub(crate) fn default_group_ratio(&self) -> f64 {
        self.group_ratio
            .get("default")
            .copied()
            .unwrap_or(DEFAULT_GROUP_RATIO)
    }

    /// Re-parse a raw payload (as persisted in the price history).
    pub(crate) fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// /api/user/self identity and balance fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UserInfo {
    #[serde(default)]
    pub(crate) username: Option<String>,
    #[serde(default)]
    pub(crate) email: Option<String>,
    #[serde(default)]
    pub(crate) group: Option<String>,
    /// Remaining balance in quota units.
    #[serde(default)]
    pub(crate) quota: Option<i64>,
    /// Lifetime spend in quota units.
    #[serde(default)]
    pub(crate) used_quota: Option<i64>,
    #[serde(default)]
    pub(crate) request_count: Option<i64>,
}

impl UserInfo {
    pub(crate) fn remaining_usd(&self) -> Option<f64> {
        self.quota.map(|q| q as f64 / QUOTA_PER_USD)
    }

    pub(crate) fn used_usd(&self) -> Option<f64> {
        self.used_quota.map(|q| q as f64 / QUOTA_PER_USD)
    }
}
