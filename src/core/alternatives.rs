//! Cheaper-substitute selection for a target model.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::core::capability::{CapabilityIndex, SimilarityWeights, capability_similarity};
use crate::core::category::classify;
use crate::core::types::PriceQuote;

/// Which strategy produced a recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MatchStrategy {
    /// Capability-vector similarity cleared the threshold.
    Capability,
    /// Same product family, strictly cheaper.
    Category,
    /// Target unpriced, or no qualifying candidate.
    None,
}

impl MatchStrategy {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            MatchStrategy::Capability => "capability",
            MatchStrategy::Category => "category",
            MatchStrategy::None => "none",
        }
    }
}

/// Tuning constants for the finder. The defaults preserve the upstream
/// magic numbers: 0.75 threshold, 0.5/0.3/0.2 weights, three results.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FinderConfig {
    pub(crate) similarity_threshold: f64,
    pub(crate) weights: SimilarityWeights,
    pub(crate) max_results: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
            weights: SimilarityWeights::default(),
            max_results: 3,
        }
    }
}

/// One recommended substitute.
#[derive(Debug, Clone)]
pub(crate) struct Alternative {
    pub(crate) model: String,
    pub(crate) quote: PriceQuote,
    /// Present only for capability matches.
    pub(crate) similarity: Option<f64>,
}

/// Orchestrates the two recommendation strategies with strict
/// precedence: capability similarity first, category fallback second,
/// never merged. The first strategy that yields candidates wins.
pub(crate) struct AlternativeFinder<'a> {
    price_map: &'a HashMap<String, PriceQuote>,
    capabilities: &'a CapabilityIndex,
    config: FinderConfig,
}

impl<'a> AlternativeFinder<'a> {
    pub(crate) fn new(
        price_map: &'a HashMap<String, PriceQuote>,
        capabilities: &'a CapabilityIndex,
    ) -> Self {
        Self::with_config(price_map, capabilities, FinderConfig::default())
    }

    pub(crate) fn with_config(
        price_map: &'a HashMap<String, PriceQuote>,
        capabilities: &'a CapabilityIndex,
        config: FinderConfig,
    ) -> Self {
        Self {
            price_map,
            capabilities,
            config,
        }
    }

    /// Up to `max_results` models strictly cheaper than the target,
    /// tagged with the strategy that produced them. A target absent
    /// from the price map yields an empty list tagged `None`: "price
    /// unknown" is not comparable.
    pub(crate) fn find(&self, target: &str) -> (Vec<Alternative>, MatchStrategy) {
        let Some(target_quote) = self.price_map.get(target) else {
            return (Vec::new(), MatchStrategy::None);
        };

        if let Some(found) = self.by_capability(target, target_quote) {
            return (found, MatchStrategy::Capability);
        }
        if let Some(found) = self.by_category(target, target_quote) {
            return (found, MatchStrategy::Category);
        }
        (Vec::new(), MatchStrategy::None)
    }

    /// Candidates with a known capability vector, strictly cheaper and
    /// at least `similarity_threshold` similar. Ranked by similarity
    /// descending, ties by average cost ascending.
    fn by_capability(&self, target: &str, target_quote: &PriceQuote) -> Option<Vec<Alternative>> {
        let target_cap = self.capabilities.get(target)?;

        let mut scored: Vec<Alternative> = Vec::new();
        for (model, quote) in self.price_map {
            if model == target || quote.avg_cost >= target_quote.avg_cost {
                continue;
            }
            let Some(candidate_cap) = self.capabilities.get(model) else {
                continue;
            };
            let Some(similarity) =
                capability_similarity(target_cap, candidate_cap, self.config.weights)
            else {
                continue;
            };
            if similarity < self.config.similarity_threshold {
                continue;
            }
            scored.push(Alternative {
                model: model.clone(),
                quote: *quote,
                similarity: Some(similarity),
            });
        }

        if scored.is_empty() {
            return None;
        }
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.quote
                        .avg_cost
                        .partial_cmp(&b.quote.avg_cost)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.model.cmp(&b.model))
        });
        scored.truncate(self.config.max_results);
        Some(scored)
    }

    /// Same-family candidates with strictly lower average cost, ranked
    /// cheapest first.
    fn by_category(&self, target: &str, target_quote: &PriceQuote) -> Option<Vec<Alternative>> {
        let target_category = classify(target);

        let mut cheaper: Vec<Alternative> = Vec::new();
        for (model, quote) in self.price_map {
            if model == target || classify(model) != target_category {
                continue;
            }
            if quote.avg_cost < target_quote.avg_cost {
                cheaper.push(Alternative {
                    model: model.clone(),
                    quote: *quote,
                    similarity: None,
                });
            }
        }

        if cheaper.is_empty() {
            return None;
        }
        cheaper.sort_by(|a, b| {
            a.quote
                .avg_cost
                .partial_cmp(&b.quote.avg_cost)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.model.cmp(&b.model))
        });
        cheaper.truncate(self.config.max_results);
        Some(cheaper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CapabilityVector;

    fn quote(avg: f64) -> PriceQuote {
        PriceQuote {
            input_price: avg,
            output_price: avg,
            avg_cost: avg,
        }
    }

    fn vector(context: f64, reasoning: f64, speed: f64) -> CapabilityVector {
        CapabilityVector {
            context_length: Some(context),
            reasoning_score: Some(reasoning),
            speed_score: Some(speed),
        }
    }

    fn price_map(entries: &[(&str, f64)]) -> HashMap<String, PriceQuote> {
        entries
            .iter()
            .map(|(name, avg)| (name.to_string(), quote(*avg)))
            .collect()
    }

    fn capabilities(entries: &[(&str, CapabilityVector)]) -> CapabilityIndex {
        CapabilityIndex::new(
            entries
                .iter()
                .map(|(name, v)| (name.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn unpriced_target_yields_none() {
        let prices = price_map(&[("claude-sonnet-4", 1.0)]);
        let caps = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("missing-model");
        assert!(found.is_empty());
        assert_eq!(strategy, MatchStrategy::None);
    }

    #[test]
    fn capability_match_wins_over_category() {
        let prices = price_map(&[
            ("claude-opus-4", 10.0),
            ("claude-sonnet-4", 2.0),
            ("claude-haiku-4", 1.0),
        ]);
        let caps = capabilities(&[
            ("claude-opus-4", vector(200_000.0, 9.0, 5.0)),
            ("claude-sonnet-4", vector(200_000.0, 8.0, 6.0)),
        ]);
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("claude-opus-4");
        // haiku shares the family but has no capability vector; sonnet
        // clears the threshold, so the capability strategy must win.
        assert_eq!(strategy, MatchStrategy::Capability);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model, "claude-sonnet-4");
        assert!(found[0].similarity.unwrap() >= 0.75);
    }

    #[test]
    fn never_returns_candidates_at_or_above_target_cost() {
        let prices = price_map(&[
            ("claude-opus-4", 5.0),
            ("claude-sonnet-4", 5.0),
            ("claude-haiku-4", 7.0),
        ]);
        let caps = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, _) = finder.find("claude-opus-4");
        for alt in &found {
            assert!(alt.quote.avg_cost < 5.0);
        }
        assert!(found.is_empty());
    }

    #[test]
    fn dissimilar_cheaper_candidates_are_excluded() {
        let prices = price_map(&[("claude-opus-giant", 10.0), ("gpt-4-tiny", 1.0)]);
        let caps = capabilities(&[
            ("claude-opus-giant", vector(1_000_000.0, 9.0, 5.0)),
            ("gpt-4-tiny", vector(8_000.0, 9.0, 5.0)),
        ]);
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("claude-opus-giant");
        // similarity ~0.504 < 0.75, and the families differ, so the
        // category fallback finds nothing either.
        assert!(found.is_empty());
        assert_eq!(strategy, MatchStrategy::None);
    }

    #[test]
    fn unmatched_names_share_the_other_family() {
        let prices = price_map(&[("llama-3-70b", 4.0), ("mistral-large", 1.0)]);
        let caps = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("llama-3-70b");
        assert_eq!(strategy, MatchStrategy::Category);
        assert_eq!(found[0].model, "mistral-large");
    }

    #[test]
    fn missing_target_vector_falls_through_to_category() {
        let prices = price_map(&[
            ("gpt-5.2", 4.0),
            ("gpt-5-mini", 1.0),
            ("gpt-4o", 2.0),
            ("gemini-2.5-pro", 0.5),
        ]);
        let caps = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("gpt-5.2");
        assert_eq!(strategy, MatchStrategy::Category);
        let models: Vec<&str> = found.iter().map(|a| a.model.as_str()).collect();
        // cheapest first, gemini is outside the family
        assert_eq!(models, ["gpt-5-mini", "gpt-4o"]);
    }

    #[test]
    fn zero_capability_survivors_fall_through_to_category() {
        let prices = price_map(&[("claude-opus-4", 10.0), ("claude-haiku-4", 1.0)]);
        // Target has a vector but the only cheaper family member does
        // not, so the capability pass produces nothing.
        let caps = capabilities(&[("claude-opus-4", vector(200_000.0, 9.0, 5.0))]);
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("claude-opus-4");
        assert_eq!(strategy, MatchStrategy::Category);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model, "claude-haiku-4");
        assert!(found[0].similarity.is_none());
    }

    #[test]
    fn capability_ranking_orders_by_similarity_then_cost() {
        let prices = price_map(&[
            ("target", 10.0),
            ("close-pricier", 5.0),
            ("close-cheaper", 2.0),
            ("closest", 4.0),
        ]);
        let caps = capabilities(&[
            ("target", vector(100_000.0, 8.0, 5.0)),
            ("close-pricier", vector(100_000.0, 7.0, 5.0)),
            ("close-cheaper", vector(100_000.0, 7.0, 5.0)),
            ("closest", vector(100_000.0, 8.0, 5.0)),
        ]);
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("target");
        assert_eq!(strategy, MatchStrategy::Capability);
        let models: Vec<&str> = found.iter().map(|a| a.model.as_str()).collect();
        // identical vector first, then the two 0.97s by ascending cost
        assert_eq!(models, ["closest", "close-cheaper", "close-pricier"]);
    }

    #[test]
    fn results_are_capped_at_max_results() {
        let prices = price_map(&[
            ("gpt-5.2", 10.0),
            ("gpt-a", 1.0),
            ("gpt-b", 2.0),
            ("gpt-c", 3.0),
            ("gpt-d", 4.0),
        ]);
        let caps = CapabilityIndex::default();
        let finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = finder.find("gpt-5.2");
        assert_eq!(strategy, MatchStrategy::Category);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn threshold_is_configurable() {
        let prices = price_map(&[("claude-opus-big", 10.0), ("gpt-4-half", 1.0)]);
        let caps = capabilities(&[
            ("claude-opus-big", vector(200_000.0, 9.0, 5.0)),
            ("gpt-4-half", vector(100_000.0, 9.0, 5.0)),
        ]);
        // similarity 0.75 exactly clears the default threshold; a
        // stricter config must reject it (families differ, so nothing
        // comes back through the category path).
        let strict = FinderConfig {
            similarity_threshold: 0.9,
            ..Default::default()
        };
        let finder = AlternativeFinder::with_config(&prices, &caps, strict);
        let (found, strategy) = finder.find("claude-opus-big");
        assert!(found.is_empty());
        assert_eq!(strategy, MatchStrategy::None);

        let default_finder = AlternativeFinder::new(&prices, &caps);
        let (found, strategy) = default_finder.find("claude-opus-big");
        assert_eq!(strategy, MatchStrategy::Capability);
        assert_eq!(found.len(), 1);
    }
}
