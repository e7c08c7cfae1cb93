//! Usage reduction: raw gateway records into per-model totals.

use std::collections::HashMap;

use crate::core::types::{ModelUsage, UsageRecord, UsageStat};

/// Reduce raw usage records into per-model totals, ranked by descending
/// quota. The sort is stable, so models tied on quota keep their
/// first-encounter order.
pub(crate) fn aggregate_usage(records: &[UsageRecord]) -> Vec<ModelUsage> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<ModelUsage> = Vec::new();

    for record in records {
        let model = record.model();
        let slot = *slots.entry(model).or_insert_with(|| {
            ranked.push(ModelUsage {
                model: model.to_string(),
                stats: UsageStat::default(),
            });
            ranked.len() - 1
        });
        ranked[slot].stats.add(record);
    }

    ranked.sort_by_key(|usage| std::cmp::Reverse(usage.stats.quota));
    ranked
}

/// Window-wide totals across all records.
pub(crate) fn total_usage(records: &[UsageRecord]) -> UsageStat {
    let mut total = UsageStat::default();
    for record in records {
        total.add(record);
    }
    total
}
