// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidate document set computation for OR, AND, and PHRASE queries.

use crate::error::Result;
use crate::index::Index;
use crate::types::{DocId, FieldKind};
use std::collections::HashSet;

/// Union across every query term and every active field.
pub fn resolve_or(index: &Index, terms: &[String], fields: &[FieldKind]) -> Result<HashSet<DocId>> {
    let mut candidates = HashSet::new();
    for term in terms {
        for &field in fields {
            candidates.extend(index.get_postings(term, field)?.keys().copied());
        }
    }
    Ok(candidates)
}

/// Intersection of each term's per-field union. Empty if any query term
/// has no postings in any active field.
pub fn resolve_and(index: &Index, terms: &[String], fields: &[FieldKind]) -> Result<HashSet<DocId>> {
    let mut candidates: Option<HashSet<DocId>> = None;
    for term in terms {
        let mut term_docs = HashSet::new();
        for &field in fields {
            term_docs.extend(index.get_postings(term, field)?.keys().copied());
        }
        candidates = Some(match candidates {
            None => term_docs,
            Some(acc) => acc.intersection(&term_docs).copied().collect(),
        });
        if candidates.as_ref().is_some_and(HashSet::is_empty) {
            break;
        }
    }
    Ok(candidates.unwrap_or_default())
}

/// AND-on-T prefilter, then a raw substring test against each candidate's
/// original TITLE text (not the tokenized term sequence).
pub fn resolve_phrase(index: &Index, terms: &[String], query_text: &str) -> Result<HashSet<DocId>> {
    let prefiltered = resolve_and(index, terms, &[FieldKind::Title])?;
    let mut matched = HashSet::new();
    for doc_id in prefiltered {
        if let Some(doc) = index.get_doc(doc_id) {
            if doc.text_t.contains(query_text) {
                matched.insert(doc_id);
            }
        }
    }
    Ok(matched)
}
