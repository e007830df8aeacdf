//! Loading realistic export directories through [`KnowledgeSource`].
//!
//! Covers: unreadable metadata, chunks missing their text, an empty
//! enriched export next to a valid plain one, and the error code surfaced
//! when every candidate file is corrupt.

use ramadvisor_core::error::{ErrorCode, KnowledgeError};
use ramadvisor_core::knowledge::{CHUNKS_FILE, ENRICHED_CHUNKS_FILE, METADATA_FILE};
use ramadvisor_core::{JsonDirectorySource, KnowledgeSource};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn export_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for (name, body) in files {
        fs::write(dir.path().join(name), body).expect("write fixture");
    }
    dir
}

fn load(dir: &Path) -> anyhow::Result<ramadvisor_core::KnowledgeBase> {
    JsonDirectorySource::new(dir).load()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn unreadable_metadata_is_ignored() {
    let dir = export_dir(&[
        (CHUNKS_FILE, r#"[{"text": "Bonds pay coupons."}]"#),
        (METADATA_FILE, "not json at all"),
    ]);

    let base = load(dir.path()).expect("chunks still load");
    assert_eq!(base.chunks.len(), 1);
    assert_eq!(base.metadata.embedding_dim, None);
}

#[test]
fn chunks_without_text_are_kept_for_the_engine_to_drop() {
    let dir = export_dir(&[(
        CHUNKS_FILE,
        r#"[
            {"text": "Rebalance annually.", "topic_category": "Asset Allocation"},
            {"topic_category": "Risk Management", "page_number": 4},
            {"text": "   "}
        ]"#,
    )]);

    let base = load(dir.path()).expect("load");
    assert_eq!(base.chunks.len(), 3);
    let usable = base.chunks.iter().filter(|c| c.is_usable()).count();
    assert_eq!(usable, 1);
}

#[test]
fn empty_enriched_export_falls_back_to_plain() {
    let dir = export_dir(&[
        (ENRICHED_CHUNKS_FILE, "[]"),
        (CHUNKS_FILE, r#"[{"text": "Plain passage."}]"#),
    ]);

    let base = load(dir.path()).expect("load");
    assert!(!base.source_enriched);
    assert!(base.origin.ends_with(CHUNKS_FILE));
}

#[test]
fn per_chunk_enrichment_flag_is_preserved() {
    let dir = export_dir(&[(
        ENRICHED_CHUNKS_FILE,
        r#"[
            {"text": "Risk tolerance [Termes FR: risque, tolérance]", "enriched_with_french": true},
            {"text": "Liquidity needs."}
        ]"#,
    )]);

    let base = load(dir.path()).expect("load");
    assert!(base.source_enriched);
    assert!(base.chunks[0].enriched_with_french);
    assert!(!base.chunks[1].enriched_with_french);
}

#[test]
fn corrupt_exports_map_to_parse_code() {
    let dir = export_dir(&[(ENRICHED_CHUNKS_FILE, "{"), (CHUNKS_FILE, "[{\"text\": \"unterminated")]);

    let err = load(dir.path()).expect_err("both files corrupt");
    let typed = err
        .downcast_ref::<KnowledgeError>()
        .expect("typed knowledge error");
    assert_eq!(typed.code(), ErrorCode::KnowledgeParseError);
    assert!(err.to_string().contains(CHUNKS_FILE));
}
