//! Core data model: rate-card entries, derived prices, usage records,
//! and capability vectors.
//!
//! The gateway payload shape is not contractually guaranteed, so every
//! numeric field decodes permissively: missing or null values become
//! `None` and pick up documented defaults at computation time.

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::UNKNOWN;

/// Billing mode of a rate-card entry. The gateway encodes this as an
/// integer: 0 = per-token text billing, 1 = per-image billing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum QuotaType {
    #[default]
    Text,
    Image,
}

fn quota_type_from_int<'de, D>(deserializer: D) -> Result<QuotaType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(1) => QuotaType::Image,
        _ => QuotaType::Text,
    })
}

/// One model's row in the gateway rate card.
///
/// `model_ratio` defaults to 0 and `completion_ratio` to 1 when the
/// payload omits them; the defaults are applied by the price
/// calculator, not here, so the raw entry still records what the
/// gateway sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RateCardEntry {
    #[serde(default)]
    pub(crate) model_name: String,
    #[serde(default, deserialize_with = "quota_type_from_int")]
    pub(crate) quota_type: QuotaType,
    #[serde(default)]
    pub(crate) model_ratio: Option<f64>,
    #[serde(default)]
    pub(crate) completion_ratio: Option<f64>,
    /// Flat per-image price, only meaningful for `QuotaType::Image`.
    #[serde(default)]
    pub(crate) model_price: Option<f64>,
    #[serde(default)]
    pub(crate) supported_endpoint_types: Vec<String>,
}

/// Effective USD prices per million tokens for a text model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct PriceQuote {
    pub(crate) input_price: f64,
    pub(crate) output_price: f64,
    pub(crate) avg_cost: f64,
}

/// Effective user price for one rate-card entry. Text and image results
/// are mutually exclusive; `avg_cost` only exists on the text side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ModelPrice {
    Text(PriceQuote),
    Image { price_per_image: f64 },
}

/// Raw usage record from the console data endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct UsageRecord {
    #[serde(default)]
    pub(crate) model_name: Option<String>,
    /// Spend in the gateway's smallest quota unit.
    #[serde(default)]
    pub(crate) quota: Option<i64>,
    #[serde(default)]
    pub(crate) token_used: Option<i64>,
    #[serde(default)]
    pub(crate) count: Option<i64>,
}

impl UsageRecord {
    pub(crate) fn model(&self) -> &str {
        self.model_name.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Accumulated totals for one model across a usage window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct UsageStat {
    pub(crate) quota: i64,
    pub(crate) token_used: i64,
    pub(crate) count: i64,
}

impl UsageStat {
    pub(crate) fn add(&mut self, record: &UsageRecord) {
        self.quota += record.quota.unwrap_or(0);
        self.token_used += record.token_used.unwrap_or(0);
        self.count += record.count.unwrap_or(0);
    }

    pub(crate) fn quota_usd(&self) -> f64 {
        self.quota as f64 / crate::consts::QUOTA_PER_USD
    }
}

/// One model's slot in the usage ranking.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ModelUsage {
    pub(crate) model: String,
    #[serde(flatten)]
    pub(crate) stats: UsageStat,
}

/// Capability profile for one model, sourced from static configuration.
///
/// Every component is optional; a partially filled vector can never
/// produce a similarity score (the undefined state propagates).
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CapabilityVector {
    /// Context window in tokens.
    #[serde(default)]
    pub(crate) context_length: Option<f64>,
    /// Nominal [0, 10] score, clamped on read.
    #[serde(default)]
    pub(crate) reasoning_score: Option<f64>,
    /// Nominal [0, 10] score, clamped on read.
    #[serde(default)]
    pub(crate) speed_score: Option<f64>,
}
