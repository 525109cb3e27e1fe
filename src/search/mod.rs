// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine facade: wires the parser, resolver, scorer, and
//! snippet generator into a single `search()` call.

use crate::error::Result;
use crate::index::Index;
use crate::query::{self, ParsedQuery};
use crate::resolve;
use crate::scoring::score_document;
use crate::snippet::{self, Snippet};
use crate::tokenizer::tokenize;
use crate::types::{DocId, FieldKind};
use std::path::Path;

/// One scored, ranked result.
#[derive(Debug, Clone)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub relpath: String,
    pub score: f64,
}

/// The outcome of one `search()` call.
pub struct SearchResult {
    pub query_text: String,
    pub total_matches: usize,
    pub top: Vec<ScoredDoc>,
    pub snippets: Vec<Vec<Snippet>>,
}

/// Owns a loaded index and exposes the single top-level query entry point.
pub struct SearchEngine {
    index: Index,
}

impl SearchEngine {
    pub fn open(index_dir: &Path) -> Result<Self> {
        Ok(SearchEngine {
            index: Index::open(index_dir)?,
        })
    }

    /// Parses, resolves, scores, ranks, and (if verbose) generates
    /// snippets for `raw_query`. Clears the per-process postings cache at
    /// the start of the call, per the index loader's cache contract.
    pub fn search(&self, raw_query: &str) -> Result<SearchResult> {
        self.index.clear_cache();

        let parsed: ParsedQuery = query::parse(raw_query)?;

        if parsed.query_text.is_empty() {
            return Ok(SearchResult {
                query_text: raw_query.to_string(),
                total_matches: 0,
                top: Vec::new(),
                snippets: Vec::new(),
            });
        }

        let terms = tokenize(&parsed.query_text);
        let fields: Vec<FieldKind> = parsed.fields.iter().copied().collect();

        let candidates = if parsed.phrase_mode {
            resolve::resolve_phrase(&self.index, &terms, &parsed.query_text)?
        } else if parsed.and_mode {
            resolve::resolve_and(&self.index, &terms, &fields)?
        } else {
            resolve::resolve_or(&self.index, &terms, &fields)?
        };

        let score_fields: Vec<FieldKind> = if parsed.phrase_mode {
            vec![FieldKind::Title]
        } else {
            fields.clone()
        };

        let mut scored: Vec<ScoredDoc> = Vec::with_capacity(candidates.len());
        for doc_id in candidates {
            let score = score_document(&self.index, doc_id, &terms, &score_fields)?;
            if let Some(doc) = self.index.get_doc(doc_id) {
                scored.push(ScoredDoc {
                    doc_id,
                    relpath: doc.relpath.clone(),
                    score,
                });
            }
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.doc_id.cmp(&b.doc_id))
        });

        let total_matches = scored.len();
        let top: Vec<ScoredDoc> = scored.into_iter().take(5).collect();

        let snippets = if parsed.verbose {
            top.iter()
                .map(|result| self.snippets_for(result.doc_id, &parsed, &terms))
                .collect()
        } else {
            Vec::new()
        };

        Ok(SearchResult {
            query_text: raw_query.to_string(),
            total_matches,
            top,
            snippets,
        })
    }

    fn snippets_for(&self, doc_id: DocId, parsed: &ParsedQuery, terms: &[String]) -> Vec<Snippet> {
        let Some(doc) = self.index.get_doc(doc_id) else {
            return Vec::new();
        };

        if parsed.phrase_mode {
            return vec![snippet::phrase_snippet(&doc.text_t, &parsed.query_text)];
        }

        let field_texts: Vec<(FieldKind, &str)> = FieldKind::ALL
            .into_iter()
            .filter(|f| parsed.fields.contains(f))
            .map(|f| (f, doc.text_for(f)))
            .collect();

        if parsed.and_mode {
            snippet::and_snippets(&field_texts, terms)
        } else {
            snippet::or_snippet(&field_texts, terms).into_iter().collect()
        }
    }
}
