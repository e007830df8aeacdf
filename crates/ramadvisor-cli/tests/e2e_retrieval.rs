//! E2E tests for the `rma` binary: `rma search`, `rma prompt`,
//! `rma translate`, `rma stats`.
//!
//! Covers: search JSON schema and ordering, prompt budget, translation
//! output, stats for a real export and for the sample fallback, and the
//! error codes reported for blank queries, bad config, and corrupt data.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

const RETIREMENT: &str =
    "Conservative investment strategies focus on capital preservation for retirement planning.";

fn rma_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rma"));
    cmd.current_dir(dir);
    cmd.env("RMA_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"));
    cmd.env_remove("FORMAT");
    cmd
}

/// Project dir with a plain knowledge export under `data/`.
fn project_with_export() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let data = dir.path().join("data");
    fs::create_dir(&data).expect("data dir");
    let chunks = serde_json::json!([
        {
            "text": "Asset allocation across stocks and bonds.",
            "topic_category": "Asset Allocation",
            "page_number": 3
        },
        {
            "text": RETIREMENT,
            "topic_category": "Risk Management",
            "page_number": 7
        },
        {
            "text": "Aggressive growth strategies accept higher volatility.",
            "topic_category": "Investment Strategy"
        },
        {
            "text": "Client onboarding captures goals and constraints.",
            "topic_category": "Client Management"
        }
    ]);
    fs::write(
        data.join("cfa_knowledge_embeddings.json"),
        serde_json::to_string(&chunks).expect("serialize"),
    )
    .expect("write export");
    dir
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = rma_cmd(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .expect("rma should not crash");
    assert!(
        output.status.success(),
        "rma {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

// ---------------------------------------------------------------------------
// rma search
// ---------------------------------------------------------------------------

#[test]
fn search_json_has_expected_fields() {
    let dir = project_with_export();
    let json = run_json(
        dir.path(),
        &["search", "préparer ma retraite en toute sécurité", "-p", "Prudent"],
    );

    assert_eq!(json["profile"], "conservative");
    assert!(json["translated"].as_str().expect("translated").contains("retirement"));
    assert_eq!(json["degraded"], false);

    let results = json["results"].as_array().expect("results array");
    assert!(!results.is_empty());
    assert_eq!(json["count"].as_u64(), Some(results.len() as u64));

    let top = &results[0];
    assert_eq!(top["rank"], 1);
    assert_eq!(top["index"], 1);
    assert_eq!(top["stage"], "primary");
    assert_eq!(top["category"], "Risk Management");
    assert_eq!(top["page"], 7);
    assert!(top.get("breakdown").is_none(), "breakdown only with --explain");
    assert!(
        top["preview"].as_str().expect("preview").contains("retirement"),
        "preview: {}",
        top["preview"]
    );
}

#[test]
fn search_respects_limit_and_order() {
    let dir = project_with_export();
    let json = run_json(
        dir.path(),
        &["search", "stratégie d'investissement et allocation de portefeuille", "-n", "2"],
    );

    let scores: Vec<f64> = json["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|r| r["score"].as_f64().expect("score"))
        .collect();
    assert_eq!(scores.len(), 2);
    assert!(scores[0] >= scores[1], "scores not descending: {scores:?}");
}

#[test]
fn search_explain_includes_breakdown() {
    let dir = project_with_export();
    let json = run_json(dir.path(), &["search", "retraite", "--explain"]);
    let top = &json["results"][0];
    let breakdown = top.get("breakdown").expect("breakdown present");
    for field in ["vector", "keyword", "source_term", "category", "profile", "keyword_matches"] {
        assert!(breakdown.get(field).is_some(), "missing breakdown.{field}");
    }
}

#[test]
fn search_text_output_is_tab_separated() {
    let dir = project_with_export();
    let output = rma_cmd(dir.path())
        .args(["search", "retraite", "--format", "text"])
        .output()
        .expect("rma should not crash");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let first = stdout.lines().next().expect("at least one row");
    let fields: Vec<&str> = first.split('\t').collect();
    assert_eq!(fields.len(), 5, "row: {first}");
    assert_eq!(fields[0], "1");
}

#[test]
fn blank_query_fails_with_empty_query_code() {
    let dir = project_with_export();
    rma_cmd(dir.path())
        .args(["search", "   ", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]"));
}

#[test]
fn blank_query_error_is_json_in_json_mode() {
    let dir = project_with_export();
    let output = rma_cmd(dir.path())
        .args(["search", "", "--format", "json"])
        .output()
        .expect("rma should not crash");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error_code\": \"E2001\""), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// rma prompt
// ---------------------------------------------------------------------------

#[test]
fn prompt_stays_within_budget() {
    let dir = project_with_export();
    let json = run_json(dir.path(), &["prompt", "retraite", "--max-length", "150"]);

    let text = json["text"].as_str().expect("text");
    assert!(text.starts_with("CONNAISSANCE CFA PERTINENTE:"));
    assert!(text.chars().count() <= 150, "len {}", text.chars().count());
    assert_eq!(json["length"].as_u64(), Some(text.chars().count() as u64));
}

#[test]
fn enhanced_prompt_uses_preset() {
    let dir = project_with_export();
    let json = run_json(dir.path(), &["prompt", "gestion des risques", "--enhanced"]);
    assert!(json["chunks"].as_u64().expect("chunks") <= 3);
    assert!(json["length"].as_u64().expect("length") <= 1800);
}

// ---------------------------------------------------------------------------
// rma translate
// ---------------------------------------------------------------------------

#[test]
fn translate_reports_expression_and_keywords() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["translate", "gestion de patrimoine"]);

    assert!(
        json["translated"]
            .as_str()
            .expect("translated")
            .contains("wealth management")
    );
    let keywords: Vec<&str> = json["keywords"]
        .as_array()
        .expect("keywords")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(keywords.contains(&"patrimoine"));
    assert!(keywords.contains(&"wealth"));
}

#[test]
fn translate_needs_no_data() {
    let dir = TempDir::new().expect("tempdir");
    rma_cmd(dir.path())
        .args(["--data-dir", "does-not-exist", "translate", "risque", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("risk"));
}

// ---------------------------------------------------------------------------
// rma stats
// ---------------------------------------------------------------------------

#[test]
fn stats_describe_loaded_export() {
    let dir = project_with_export();
    let json = run_json(dir.path(), &["stats"]);

    assert_eq!(json["state"], "ready");
    assert_eq!(json["mode"], "multilingual");
    assert_eq!(json["total_chunks"], 4);
    assert_eq!(json["total_pages"], 7);
    assert_eq!(json["degraded"], false);
    assert_eq!(json["source_enriched"], false);
    let categories = json["categories"].as_array().expect("categories");
    assert_eq!(categories.len(), 4);
}

#[test]
fn basic_flag_switches_mode() {
    let dir = project_with_export();
    let json = run_json(dir.path(), &["--basic", "stats"]);
    assert_eq!(json["mode"], "basic");
}

#[test]
fn missing_data_serves_sample_set() {
    let dir = TempDir::new().expect("tempdir");
    let json = run_json(dir.path(), &["stats", "--data-dir", "nowhere"]);

    assert_eq!(json["degraded"], true);
    assert_eq!(json["total_chunks"], 4);
    assert_eq!(json["with_embeddings"], 4);
}

#[test]
fn corrupt_export_without_fallback_reports_parse_code() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("data")).expect("data dir");
    fs::write(dir.path().join("data/cfa_knowledge_embeddings.json"), "{oops").expect("write");
    fs::write(
        dir.path().join("ramadvisor.toml"),
        "[search]\nsample_fallback = false\n",
    )
    .expect("write config");

    rma_cmd(dir.path())
        .args(["stats", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn unparsable_config_reports_config_code() {
    let dir = project_with_export();
    fs::write(dir.path().join("ramadvisor.toml"), "[search\nmode = ").expect("write config");

    rma_cmd(dir.path())
        .args(["stats", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1003]"));
}
