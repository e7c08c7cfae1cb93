//! Account balance snapshot written after a balance query.

use std::fs::File;

use serde::Serialize;

use crate::api::UserInfo;
use crate::core::{ModelUsage, UsageRecord, aggregate_usage, total_usage};

use super::paths::balance_snapshot_path;

const TOP_MODELS_IN_SNAPSHOT: usize = 5;

#[derive(Debug, Serialize)]
pub(crate) struct BalanceSnapshot {
    pub(crate) timestamp: String,
    pub(crate) user: SnapshotUser,
    pub(crate) balance: SnapshotBalance,
    pub(crate) usage_window: UsageWindow,
    pub(crate) usage_summary: UsageSummary,
}

#[derive(Debug, Serialize)]
pub(crate) struct SnapshotUser {
    pub(crate) username: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) group: Option<String>,
    pub(crate) request_count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SnapshotBalance {
    pub(crate) quota: Option<i64>,
    pub(crate) used_quota: Option<i64>,
    /// Quota converted to USD; None when the gateway withheld it.
    pub(crate) remaining_amount: Option<f64>,
    pub(crate) used_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsageWindow {
    pub(crate) start_timestamp: i64,
    pub(crate) end_timestamp: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct UsageSummary {
    pub(crate) total_quota: i64,
    pub(crate) total_tokens: i64,
    pub(crate) total_count: i64,
    pub(crate) top_models: Vec<ModelUsage>,
}

pub(crate) fn build_snapshot(
    user: &UserInfo,
    records: &[UsageRecord],
    start_timestamp: i64,
    end_timestamp: i64,
) -> BalanceSnapshot {
    let totals = total_usage(records);
    let mut top_models = aggregate_usage(records);
    top_models.truncate(TOP_MODELS_IN_SNAPSHOT);

    BalanceSnapshot {
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        user: SnapshotUser {
            username: user.username.clone(),
            email: user.email.clone(),
            group: user.group.clone(),
            request_count: user.request_count,
        },
        balance: SnapshotBalance {
            quota: user.quota,
            used_quota: user.used_quota,
            remaining_amount: user.remaining_usd(),
            used_amount: user.used_usd(),
        },
        usage_window: UsageWindow {
            start_timestamp,
            end_timestamp,
        },
        usage_summary: UsageSummary {
            total_quota: totals.quota,
            total_tokens: totals.token_used,
            total_count: totals.count,
            top_models,
        },
    }
}

/// Best-effort overwrite; the balance command still succeeds when the
/// disk write fails.
pub(crate) fn save_snapshot(snapshot: &BalanceSnapshot) -> bool {
    let Some(path) = balance_snapshot_path() else {
        return false;
    };
    if let Some(parent) = path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return false;
    }
    let Ok(file) = File::create(&path) else {
        return false;
    };
    serde_json::to_writer_pretty(file, snapshot).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, quota: i64, tokens: i64, count: i64) -> UsageRecord {
        UsageRecord {
            model_name: Some(model.to_string()),
            quota: Some(quota),
            token_used: Some(tokens),
            count: Some(count),
        }
    }

    #[test]
    fn snapshot_summarizes_usage_window() {
        let user: UserInfo = serde_json::from_str(
            r#"{"username": "u", "quota": 1000000, "used_quota": 500000, "request_count": 7}"#,
        )
        .unwrap();
        let records = vec![
            record("claude-sonnet-4", 100, 1000, 2),
            record("gpt-4o", 300, 500, 1),
            record("claude-sonnet-4", 50, 200, 1),
        ];
        let snapshot = build_snapshot(&user, &records, 100, 200);

        assert_eq!(snapshot.usage_window.start_timestamp, 100);
        assert_eq!(snapshot.usage_summary.total_quota, 450);
        assert_eq!(snapshot.usage_summary.total_tokens, 1700);
        assert_eq!(snapshot.usage_summary.total_count, 4);
        assert_eq!(snapshot.usage_summary.top_models[0].model, "gpt-4o");
        assert!((snapshot.balance.remaining_amount.unwrap() - 2.0).abs() < 1e-9);
        assert!((snapshot.balance.used_amount.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_caps_top_models() {
        let user = UserInfo::default();
        let records: Vec<UsageRecord> = (0..8)
            .map(|i| record(&format!("model-{i}"), 10 * (i + 1), 0, 1))
            .collect();
        let snapshot = build_snapshot(&user, &records, 0, 1);
        assert_eq!(snapshot.usage_summary.top_models.len(), 5);
        assert_eq!(snapshot.usage_summary.top_models[0].model, "model-7");
    }

    #[test]
    fn snapshot_serializes_with_null_balance() {
        let snapshot = build_snapshot(&UserInfo::default(), &[], 0, 1);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["balance"]["remaining_amount"].is_null());
        assert_eq!(json["usage_summary"]["total_quota"], 0);
    }
}
