/// Default gateway console; any NewAPI-compatible deployment works.
pub(crate) const DEFAULT_BASE_URL: &str = "https://aiberm.com";

/// NewAPI base prices in USD per million tokens at ratio 1.0.
pub(crate) const BASE_INPUT_PRICE: f64 = 0.15;
pub(crate) const BASE_OUTPUT_PRICE: f64 = 0.6;

/// Discount applied when the payload carries no "default" group ratio.
pub(crate) const DEFAULT_GROUP_RATIO: f64 = 0.23;

/// Gateway quota units per USD.
pub(crate) const QUOTA_PER_USD: f64 = 500_000.0;

/// Pricing snapshots kept in the on-disk history (oldest evicted first).
pub(crate) const MAX_HISTORY_RECORDS: usize = 30;

/// Low-balance warning thresholds in USD.
pub(crate) const BALANCE_WARN_LOW: f64 = 5.0;
pub(crate) const BALANCE_WARN_CRITICAL: f64 = 1.0;

/// Fallback key when a usage record carries no model name.
pub(crate) const UNKNOWN: &str = "unknown";

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_USAGE_WINDOW_DAYS: i64 = 30;
