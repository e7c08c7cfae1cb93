//! Effective price derivation from the gateway rate card.

use std::collections::HashMap;

use crate::consts::{BASE_INPUT_PRICE, BASE_OUTPUT_PRICE};
use crate::core::types::{ModelPrice, PriceQuote, QuotaType, RateCardEntry};

/// Converts raw rate-card multipliers into real USD prices.
///
/// Base prices are injected at construction so tests can pin them; the
/// defaults are the NewAPI base rates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PriceCalculator {
    base_input: f64,
    base_output: f64,
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new(BASE_INPUT_PRICE, BASE_OUTPUT_PRICE)
    }
}

impl PriceCalculator {
    pub(crate) fn new(base_input: f64, base_output: f64) -> Self {
        Self {
            base_input,
            base_output,
        }
    }

    /// Effective user price for one entry under a group discount.
    ///
    /// Missing ratios fall back to 0 (input) and 1 (completion); a
    /// malformed entry prices permissively instead of failing. The
    /// group ratio is applied as-is, without clamping.
    pub(crate) fn quote(&self, entry: &RateCardEntry, group_ratio: f64) -> ModelPrice {
        if entry.quota_type == QuotaType::Image {
            return ModelPrice::Image {
                price_per_image: entry.model_price.unwrap_or(0.0) * group_ratio,
            };
        }

        let input_price = self.base_input * entry.model_ratio.unwrap_or(0.0) * group_ratio;
        let output_price =
            self.base_output * entry.completion_ratio.unwrap_or(1.0) * group_ratio;
        ModelPrice::Text(PriceQuote {
            input_price,
            output_price,
            avg_cost: (input_price + output_price) / 2.0,
        })
    }
}

/// Text-model price index: model name to effective quote.
///
/// Image entries and unnamed entries never enter the map, so neither
/// recommendation strategy can surface an image model as a text
/// alternative. A model absent from the map is "price unknown", which
/// is distinct from a zero price.
pub(crate) fn build_price_map(
    calculator: &PriceCalculator,
    entries: &[RateCardEntry],
    group_ratio: f64,
) -> HashMap<String, PriceQuote> {
    let mut map = HashMap::new();
    for entry in entries {
        if entry.model_name.is_empty() {
            continue;
        }
        if let ModelPrice::Text(quote) = calculator.quote(entry, group_ratio) {
            map.insert(entry.model_name.clone(), quote);
        }
    }
    map
}

/// Text entries priced and sorted by ascending average cost, ties broken
/// by model name for a stable listing.
pub(crate) fn rank_by_avg_cost<'a>(
    calculator: &PriceCalculator,
    entries: &'a [RateCardEntry],
    group_ratio: f64,
) -> Vec<(&'a RateCardEntry, PriceQuote)> {
    let mut ranked: Vec<(&RateCardEntry, PriceQuote)> = entries
        .iter()
        .filter(|entry| !entry.model_name.is_empty())
        .filter_map(|entry| match calculator.quote(entry, group_ratio) {
            ModelPrice::Text(quote) => Some((entry, quote)),
            ModelPrice::Image { .. } => None,
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.1.avg_cost
            .partial_cmp(&b.1.avg_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.model_name.cmp(&b.0.model_name))
    });
    ranked
}
