// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Black-box build-then-search tests against the public API.

use jiphyeon::build::build_index;
use jiphyeon::search::SearchEngine;
use std::fs;
use std::path::Path;

fn write_doc(dir: &Path, name: &str, title: &str, abstract_: &str, claims: &str) {
    let content = serde_json::json!({
        "dataset": { "invention_title": title, "abstract": abstract_, "claims": claims }
    });
    fs::write(dir.join(name), content.to_string()).unwrap();
}

#[test]
fn builds_and_searches_a_small_corpus_end_to_end() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_doc(
        input.path(),
        "patent_001.json",
        "quantum radar detection system",
        "a system for detecting objects using quantum radar signals",
        "1. A method comprising quantum radar pulses.",
    );
    write_doc(
        input.path(),
        "patent_002.json",
        "classical radar system",
        "a conventional radar system for weather monitoring",
        "1. A method comprising classical radar pulses.",
    );

    let summary = build_index(input.path(), output.path()).unwrap();
    assert_eq!(summary.total_docs, 2);

    let engine = SearchEngine::open(output.path()).unwrap();

    let result = engine.search("quantum").unwrap();
    assert_eq!(result.total_matches, 1);
    assert_eq!(result.top[0].relpath, "patent_001.json");

    let result = engine.search("radar").unwrap();
    assert_eq!(result.total_matches, 2);

    let result = engine.search("[AND] radar detection").unwrap();
    assert_eq!(result.total_matches, 1);
    assert_eq!(result.top[0].relpath, "patent_001.json");
}

#[test]
fn repeated_queries_reuse_a_freshly_cleared_cache() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_doc(input.path(), "a.json", "alpha beta", "", "");
    build_index(input.path(), output.path()).unwrap();

    let engine = SearchEngine::open(output.path()).unwrap();
    let first = engine.search("alpha").unwrap();
    let second = engine.search("alpha").unwrap();
    assert_eq!(first.top[0].score, second.top[0].score);
}

#[test]
fn empty_query_body_reports_zero_documents_without_erroring() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_doc(input.path(), "a.json", "alpha", "", "");
    build_index(input.path(), output.path()).unwrap();

    let engine = SearchEngine::open(output.path()).unwrap();
    let result = engine.search("[VERBOSE]").unwrap();
    assert_eq!(result.total_matches, 0);
}

#[test]
fn opening_a_directory_without_artifacts_fails() {
    let empty = tempfile::tempdir().unwrap();
    assert!(SearchEngine::open(empty.path()).is_err());
}
