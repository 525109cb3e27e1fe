// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index loading: opens the committed artifacts and exposes random-access
//! postings lookups with a per-query cache.

use crate::error::{EngineError, Result};
use crate::postings::read_postings;
use crate::types::{DocId, DocRecord, DocTable, FieldKind, IndexMetadata, PostingEntry, TermEntry};
use lru::LruCache;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::Path;

const CACHE_CAPACITY: usize = 4096;

/// Holds the doc table, term dictionary, and open postings handles for a
/// single committed index. Read-only for its whole lifetime.
pub struct Index {
    metadata: IndexMetadata,
    docs: Vec<DocRecord>,
    terms: HashMap<String, TermEntry>,
    postings_files: HashMap<FieldKind, RefCell<BufReader<File>>>,
    cache: RefCell<LruCache<(String, FieldKind), HashMap<DocId, u32>>>,
}

impl Index {
    /// Opens an index directory, failing fast if any artifact is missing.
    pub fn open(dir: &Path) -> Result<Self> {
        let doc_table_path = dir.join("doc_table.json");
        let term_dict_path = dir.join("term_dict.json");

        let doc_table: DocTable = read_json(&doc_table_path)?;
        let term_dict: HashMap<String, TermEntry> = read_json(&term_dict_path)?;

        let mut docs = vec![
            DocRecord {
                relpath: String::new(),
                len_t: 0,
                len_a: 0,
                len_c: 0,
                text_t: String::new(),
                text_a: String::new(),
                text_c: String::new(),
            };
            doc_table.documents.len()
        ];
        for (id_str, record) in doc_table.documents {
            let id: usize = id_str.parse().unwrap_or(0);
            if id < docs.len() {
                docs[id] = record;
            }
        }

        let mut postings_files = HashMap::with_capacity(3);
        for field in FieldKind::ALL {
            let path = dir.join(field.postings_filename());
            let file = File::open(&path).map_err(|_| EngineError::MissingIndexFile(path.clone()))?;
            postings_files.insert(field, RefCell::new(BufReader::new(file)));
        }

        Ok(Index {
            metadata: doc_table.metadata,
            docs,
            terms: term_dict,
            postings_files,
            cache: RefCell::new(LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap())),
        })
    }

    /// Clears the per-process postings cache. Must be called at the start
    /// of every top-level query.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    #[must_use]
    pub fn stats(&self) -> IndexMetadata {
        self.metadata
    }

    #[must_use]
    pub fn get_df(&self, term: &str) -> Option<u32> {
        self.terms.get(term).map(|entry| entry.df)
    }

    #[must_use]
    pub fn get_doc(&self, doc_id: DocId) -> Option<&DocRecord> {
        self.docs.get(doc_id.as_usize())
    }

    #[must_use]
    pub fn total_docs(&self) -> usize {
        self.docs.len()
    }

    /// Returns `term -> tf` for every document containing `term` in
    /// `field`, materialized on demand (and cached) from disk.
    pub fn get_postings(&self, term: &str, field: FieldKind) -> Result<HashMap<DocId, u32>> {
        let key = (term.to_string(), field);
        if let Some(hit) = self.cache.borrow_mut().get(&key) {
            return Ok(hit.clone());
        }

        let Some(entry) = self.terms.get(term) else {
            return Ok(HashMap::new());
        };
        let Some(posting_ref) = entry.field_ref(field) else {
            return Ok(HashMap::new());
        };

        let mut reader = self.postings_files[&field].borrow_mut();
        let entries: Vec<PostingEntry> =
            read_postings(&mut *reader, posting_ref.offset, posting_ref.length)?;
        let map: HashMap<DocId, u32> = entries.into_iter().map(|p| (p.doc_id, p.tf)).collect();

        self.cache.borrow_mut().put(key, map.clone());
        Ok(map)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|_| EngineError::MissingIndexFile(path.to_path_buf()))?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_index;

    fn write_doc(dir: &Path, name: &str, title: &str, abstract_: &str, claims: &str) {
        let content = serde_json::json!({
            "dataset": { "invention_title": title, "abstract": abstract_, "claims": claims }
        });
        std::fs::write(dir.join(name), content.to_string()).unwrap();
    }

    #[test]
    fn opens_and_reads_back_postings() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_doc(input.path(), "a.json", "quantum radar", "", "");
        build_index(input.path(), output.path()).unwrap();

        let index = Index::open(output.path()).unwrap();
        assert_eq!(index.total_docs(), 1);
        assert_eq!(index.get_df("quantum"), Some(1));
        let postings = index.get_postings("quantum", FieldKind::Title).unwrap();
        assert_eq!(postings.get(&DocId::new(0)), Some(&1));
    }

    #[test]
    fn missing_term_yields_empty_postings_not_error() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_doc(input.path(), "a.json", "quantum radar", "", "");
        build_index(input.path(), output.path()).unwrap();

        let index = Index::open(output.path()).unwrap();
        let postings = index.get_postings("nonexistent", FieldKind::Title).unwrap();
        assert!(postings.is_empty());
    }

    #[test]
    fn missing_artifact_file_is_a_fatal_open_error() {
        let empty_dir = tempfile::tempdir().unwrap();
        let result = Index::open(empty_dir.path());
        assert!(matches!(result, Err(EngineError::MissingIndexFile(_))));
    }

    #[test]
    fn cache_clear_does_not_change_subsequent_results() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_doc(input.path(), "a.json", "quantum radar", "", "");
        build_index(input.path(), output.path()).unwrap();

        let index = Index::open(output.path()).unwrap();
        let before = index.get_postings("quantum", FieldKind::Title).unwrap();
        index.clear_cache();
        let after = index.get_postings("quantum", FieldKind::Title).unwrap();
        assert_eq!(before, after);
    }
}
