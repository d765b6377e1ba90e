//! End-to-end tests for the `intent-expansion` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn input_json(messages: &[&str]) -> String {
    let messages: Vec<serde_json::Value> = messages
        .iter()
        .enumerate()
        .map(|(i, text)| {
            serde_json::json!({
                "id": i + 1,
                "current_message": text,
                "conversation_history": []
            })
        })
        .collect();

    serde_json::json!({
        "customer_messages": messages,
        "intent_mapper": {
            "primary_intents": [
                {
                    "id": "about_product",
                    "name": "About Product",
                    "description": "Questions about products",
                    "secondary_intents": [
                        {"id": "product_info", "name": "Product Info", "description": "Product details"}
                    ]
                },
                {
                    "id": "order_management",
                    "name": "Order Management",
                    "description": "Order lifecycle",
                    "secondary_intents": [
                        {"id": "order_cancellation", "name": "Order Cancellation", "description": "Cancel"}
                    ]
                }
            ]
        }
    })
    .to_string()
}

fn corpus() -> Vec<&'static str> {
    let mut messages = vec!["How to use the vitamin C serum?"; 12];
    messages.extend(vec!["I want a refund, the bottle arrived damaged"; 8]);
    messages.extend(vec!["Where is my parcel?"; 20]);
    messages
}

fn write_input(dir: &TempDir, messages: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join("input.json");
    std::fs::write(&path, input_json(messages)).unwrap();
    path
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("intent-expansion").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("INTENT_EXPANSION_CONFIG")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GOOGLE_API_KEY");
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn writes_json_and_markdown_reports() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &corpus());
    let output = dir.path().join("report");

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("INTENT EXPANSION ANALYSIS SUMMARY"))
        .stdout(predicate::str::contains("Messages Analyzed: 40"));

    let report = read_json(&dir.path().join("report.json"));
    assert_eq!(report["metadata"]["total_messages_analyzed"], 40);
    assert_eq!(report["metadata"]["themes_identified"], 2);
    assert_eq!(report["theme_analysis"]["product_usage"]["count"], 12);
    assert!(report.get("enrichment").is_none());

    let markdown = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(markdown.contains("## Theme Analysis"));
    assert!(markdown.contains("### Product Usage"));
}

#[test]
fn json_suffix_on_output_is_stripped() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &corpus());

    cmd()
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("analysis.json"))
        .assert()
        .success();

    assert!(dir.path().join("analysis.json").exists());
    assert!(dir.path().join("analysis.md").exists());
}

#[test]
fn threshold_flags_are_applied() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &corpus());
    let output = dir.path().join("report");

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--min-cluster-size", "10", "--max-proposals", "1"])
        .args(["--confidence-threshold", "0.0"])
        .assert()
        .success();

    let report = read_json(&dir.path().join("report.json"));
    assert_eq!(report["configuration"]["min_cluster_size"], 10);
    assert_eq!(report["configuration"]["max_proposed_intents"], 1);
    let proposals = report["proposed_intents"].as_array().unwrap();
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0]["id"], "product_usage");
    assert_eq!(report["screened_clusters"][0]["reason"], "below_min_size");
}

#[test]
fn llm_without_credential_degrades() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &corpus());
    let output = dir.path().join("report");

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--use-llm", "--llm-provider", "anthropic"])
        .assert()
        .success();

    let report = read_json(&dir.path().join("report.json"));
    assert_eq!(report["enrichment"]["provider"], "anthropic");
    assert_eq!(report["enrichment"]["status"], "unavailable");
    assert_eq!(report["configuration"]["enrichment_enabled"], true);
}

#[test]
fn config_file_replaces_catalog() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &["Can I pay with a gift card?"; 6]);
    let config = dir.path().join("expansion.toml");
    std::fs::write(
        &config,
        r#"
[pipeline]
confidence_threshold = 0.0

[[themes]]
id = "gift_cards"
name = "Gift Cards"
description = "Customer asks about buying or redeeming gift cards"
keywords = ["gift card"]
"#,
    )
    .unwrap();

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("report"))
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gift Cards"));

    let report = read_json(&dir.path().join("report.json"));
    assert_eq!(report["proposed_intents"][0]["id"], "gift_cards");
    assert_eq!(report["proposed_intents"][0]["level"], "primary");
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("nope.json"))
        .arg("-o")
        .arg(dir.path().join("report"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn empty_corpus_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &[]);
    cmd()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("report"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no customer messages to analyze"));
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn invalid_threshold_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, &corpus());
    cmd()
        .arg(&input)
        .args(["--confidence-threshold", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confidence_threshold"));
}
