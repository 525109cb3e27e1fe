// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A minimal, swappable corpus reader: walks a directory of patent JSON
//! files and yields their three text fields in deterministic order.

use crate::error::EngineError;
use serde::Deserialize;
use std::path::Path;
use walkdir::WalkDir;

/// One raw document as read off disk, before tokenization.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    pub relpath: String,
    pub title: String,
    pub abstract_: String,
    pub claims: String,
}

// `abstract` is a reserved word, so the matching struct field is named
// `abstract_` and mapped back to the JSON key via `rename`.
#[derive(Debug, Default, Deserialize)]
struct RawDataset {
    #[serde(default)]
    invention_title: String,
    #[serde(default, rename = "abstract")]
    abstract_: String,
    #[serde(default)]
    claims: String,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    dataset: RawDataset,
}

/// Recursively visits every `*.json` file under `root`, in lexicographic
/// path order, and returns the parsed records. A file that fails to parse
/// is reported as a [`EngineError::DocumentParseError`] in the returned
/// vector of failures rather than aborting the whole walk, so callers can
/// apply their own skip-or-abort policy.
pub fn read_corpus(
    root: &Path,
) -> (Vec<CorpusRecord>, Vec<EngineError>) {
    let mut paths: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for path in paths {
        match read_one(root, &path) {
            Ok(record) => records.push(record),
            Err(e) => failures.push(e),
        }
    }

    (records, failures)
}

fn read_one(root: &Path, path: &Path) -> Result<CorpusRecord, EngineError> {
    let relpath = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    let bytes = std::fs::read(path)?;
    let parsed: RawFile = serde_json::from_slice(&bytes).map_err(|e| {
        EngineError::DocumentParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    Ok(CorpusRecord {
        relpath,
        title: parsed.dataset.invention_title,
        abstract_: parsed.dataset.abstract_,
        claims: parsed.dataset.claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_well_formed_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"dataset": {"invention_title": "t", "abstract": "a", "claims": "c"}}"#,
        )
        .unwrap();
        let (records, failures) = read_corpus(dir.path());
        assert!(failures.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "t");
        assert_eq!(records[0].abstract_, "a");
        assert_eq!(records[0].claims, "c");
    }

    #[test]
    fn defaults_missing_fields_to_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), r#"{"dataset": {}}"#).unwrap();
        let (records, failures) = read_corpus(dir.path());
        assert!(failures.is_empty());
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].abstract_, "");
        assert_eq!(records[0].claims, "");
    }

    #[test]
    fn reports_malformed_json_as_failure_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"{"dataset": {"invention_title": "ok"}}"#,
        )
        .unwrap();
        let (records, failures) = read_corpus(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn duplicate_filenames_in_different_subdirs_are_distinct_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("x")).unwrap();
        fs::create_dir(dir.path().join("y")).unwrap();
        fs::write(
            dir.path().join("x/doc.json"),
            r#"{"dataset": {"invention_title": "first"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("y/doc.json"),
            r#"{"dataset": {"invention_title": "second"}}"#,
        )
        .unwrap();
        let (records, failures) = read_corpus(dir.path());
        assert!(failures.is_empty());
        assert_eq!(records.len(), 2);
    }
}
