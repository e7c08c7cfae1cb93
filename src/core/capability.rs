//! Capability index and the similarity score between capability vectors.

use std::collections::HashMap;

use crate::core::types::CapabilityVector;

/// Read-only mapping from model name to capability vector.
///
/// Absence of an entry is the normal "capability unknown" state, not an
/// error; such models can only be recommended through the category path.
#[derive(Debug, Default)]
pub(crate) struct CapabilityIndex {
    models: HashMap<String, CapabilityVector>,
}

impl CapabilityIndex {
    pub(crate) fn new(models: HashMap<String, CapabilityVector>) -> Self {
        Self { models }
    }

    pub(crate) fn get(&self, model: &str) -> Option<&CapabilityVector> {
        self.models.get(model)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Weight split across the three similarity components.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SimilarityWeights {
    pub(crate) context: f64,
    pub(crate) reasoning: f64,
    pub(crate) speed: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            context: 0.5,
            reasoning: 0.3,
            speed: 0.2,
        }
    }
}

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 10.0;

fn normalize_score(value: Option<f64>) -> Option<f64> {
    let value = value?.clamp(SCORE_MIN, SCORE_MAX);
    Some((value - SCORE_MIN) / (SCORE_MAX - SCORE_MIN))
}

fn context_similarity(target: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    let (target, candidate) = (target?, candidate?);
    if target <= 0.0 || candidate <= 0.0 {
        return None;
    }
    Some(target.min(candidate) / target.max(candidate))
}

/// Similarity in [0, 1] between two capability vectors, or None when any
/// component is undefined on either side. The None propagates instead of
/// defaulting to zero, so a model without a full vector is never
/// compared by capability.
pub(crate) fn capability_similarity(
    target: &CapabilityVector,
    candidate: &CapabilityVector,
    weights: SimilarityWeights,
) -> Option<f64> {
    let context = context_similarity(target.context_length, candidate.context_length)?;
    let target_reasoning = normalize_score(target.reasoning_score)?;
    let candidate_reasoning = normalize_score(candidate.reasoning_score)?;
    let target_speed = normalize_score(target.speed_score)?;
    let candidate_speed = normalize_score(candidate.speed_score)?;

    let reasoning = 1.0 - (target_reasoning - candidate_reasoning).abs();
    let speed = 1.0 - (target_speed - candidate_speed).abs();

    Some(context * weights.context + reasoning * weights.reasoning + speed * weights.speed)
}
