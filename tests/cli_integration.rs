use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn run_gatecost(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let output = Command::new(env!("CARGO_BIN_EXE_gatecost"))
        .args(args)
        .env("GATECOST_HOME", home)
        .output()
        .expect("run gatecost");
    (output.status.success(), output.stdout, output.stderr)
}

const PRICING_PAYLOAD: &str = r#"{
    "success": true,
    "data": [
        {"model_name": "claude-opus-4", "quota_type": 0, "model_ratio": 30.0, "completion_ratio": 5.0, "supported_endpoint_types": ["anthropic"]},
        {"model_name": "claude-sonnet-4", "quota_type": 0, "model_ratio": 6.0, "completion_ratio": 5.0, "supported_endpoint_types": ["anthropic"]},
        {"model_name": "claude-haiku-4", "quota_type": 0, "model_ratio": 1.6, "completion_ratio": 4.0, "supported_endpoint_types": ["anthropic"]},
        {"model_name": "gpt-5-mini", "quota_type": 0, "model_ratio": 0.5, "completion_ratio": 4.0, "supported_endpoint_types": ["openai"]},
        {"model_name": "dall-e-3", "quota_type": 1, "model_price": 0.04, "supported_endpoint_types": ["openai"]}
    ],
    "group_ratio": {"default": 0.23}
}"#;

fn seed_history(home: &Path) {
    let entry = format!(
        r#"[{{"timestamp": "2026-08-01T09:00:00+08:00", "data": {PRICING_PAYLOAD}}}]"#
    );
    write_file(&home.join("price_history.json"), &entry);
}

fn seed_capabilities(home: &Path) {
    write_file(
        &home.join("model_capabilities.json"),
        r#"{
            "claude-opus-4": {"context_length": 200000, "reasoning_score": 9, "speed_score": 5},
            "claude-sonnet-4": {"context_length": 200000, "reasoning_score": 8, "speed_score": 6}
        }"#,
    );
}

#[test]
fn recommend_alternative_uses_capability_strategy() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());
    seed_capabilities(home.path());

    let (ok, stdout, stderr) = run_gatecost(
        &["recommend", "--alternative", "claude-opus-4", "-j"],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["strategy"], "capability");
    let alts = json["alternatives"].as_array().unwrap();
    // haiku is cheaper but has no capability vector, so only sonnet
    // can qualify under the capability strategy
    assert_eq!(alts.len(), 1);
    assert_eq!(alts[0]["model"], "claude-sonnet-4");
    assert!(alts[0]["similarity"].as_f64().unwrap() >= 0.75);
    assert!(
        alts[0]["avg_cost"].as_f64().unwrap() < json["target_avg_cost"].as_f64().unwrap()
    );
}

#[test]
fn recommend_alternative_falls_back_to_category_without_capabilities() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, stderr) = run_gatecost(
        &["recommend", "--alternative", "claude-opus-4", "-j"],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["strategy"], "category");
    let alts = json["alternatives"].as_array().unwrap();
    // both cheaper family members, cheapest first
    assert_eq!(alts.len(), 2);
    assert_eq!(alts[0]["model"], "claude-haiku-4");
    assert_eq!(alts[1]["model"], "claude-sonnet-4");
    assert!(alts[0]["similarity"].is_null());
}

#[test]
fn recommend_alternative_unknown_model_reports_none() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, _) = run_gatecost(
        &["recommend", "--alternative", "no-such-model", "-j"],
        home.path(),
    );
    assert!(ok);

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["strategy"], "none");
    assert!(json["target_avg_cost"].is_null());
    assert!(json["alternatives"].as_array().unwrap().is_empty());
}

#[test]
fn recommend_overall_ranks_ascending_by_avg_cost() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, stderr) = run_gatecost(&["recommend", "-j", "--top", "2"], home.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    let models = json.as_array().unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0]["model"], "gpt-5-mini");
    assert_eq!(models[1]["model"], "claude-haiku-4");
    assert!(
        models[0]["avg_cost"].as_f64().unwrap() <= models[1]["avg_cost"].as_f64().unwrap()
    );
}

#[test]
fn recommend_without_history_fails_with_hint() {
    let home = tempfile::tempdir().unwrap();

    let (ok, _, stderr) = run_gatecost(&["recommend"], home.path());
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("No pricing history"));
}

#[test]
fn prices_offline_reads_snapshot_without_appending() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, stderr) = run_gatecost(&["prices", "-O", "--no-color"], home.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let text = String::from_utf8_lossy(&stdout);
    assert!(text.contains("Group discount: 0.23"));
    assert!(text.contains("claude-sonnet-4"));
    assert!(text.contains("dall-e-3"));

    // offline display must not grow the history
    let history: Value =
        serde_json::from_str(&fs::read_to_string(home.path().join("price_history.json")).unwrap())
            .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn prices_offline_json_applies_discounted_rates() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, stderr) = run_gatecost(&["prices", "-O", "-j"], home.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(json["group_ratio"], 0.23);
    let models = json["models"].as_array().unwrap();

    let sonnet = models
        .iter()
        .find(|m| m["model_name"] == "claude-sonnet-4")
        .unwrap();
    // 0.15 * 6.0 * 0.23 and 0.6 * 5.0 * 0.23
    assert!((sonnet["input_price"].as_f64().unwrap() - 0.207).abs() < 1e-9);
    assert!((sonnet["output_price"].as_f64().unwrap() - 0.69).abs() < 1e-9);

    let image = models.iter().find(|m| m["model_name"] == "dall-e-3").unwrap();
    assert_eq!(image["type"], "image");
    assert!((image["price_per_image"].as_f64().unwrap() - 0.0092).abs() < 1e-9);
}

#[test]
fn prices_offline_filter_narrows_output() {
    let home = tempfile::tempdir().unwrap();
    seed_history(home.path());

    let (ok, stdout, _) = run_gatecost(&["prices", "-O", "-j", "HAIKU"], home.path());
    assert!(ok);

    let json: Value = serde_json::from_slice(&stdout).expect("json output");
    let models = json["models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["model_name"], "claude-haiku-4");
}

#[test]
fn prices_offline_without_history_fails() {
    let home = tempfile::tempdir().unwrap();

    let (ok, _, stderr) = run_gatecost(&["prices", "-O"], home.path());
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("No pricing history"));
}
