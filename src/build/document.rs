// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document tokenization: turns a raw corpus record into the term
//! multisets the build pipeline folds into the postings accumulator.

use crate::corpus::CorpusRecord;
use crate::tokenizer::tokenize;
use crate::types::FieldKind;
use std::collections::HashMap;

/// A document after tokenization, ready to be folded into the index.
pub struct TokenizedDocument {
    pub relpath: String,
    pub text_t: String,
    pub text_a: String,
    pub text_c: String,
    pub len_t: u32,
    pub len_a: u32,
    pub len_c: u32,
    /// Per-field term -> frequency within this document.
    pub term_freqs: HashMap<FieldKind, HashMap<String, u32>>,
}

#[must_use]
pub fn tokenize_document(record: &CorpusRecord) -> TokenizedDocument {
    let t = count_terms(&record.title);
    let a = count_terms(&record.abstract_);
    let c = count_terms(&record.claims);

    let len_t = t.values().sum();
    let len_a = a.values().sum();
    let len_c = c.values().sum();

    let mut term_freqs = HashMap::with_capacity(3);
    term_freqs.insert(FieldKind::Title, t);
    term_freqs.insert(FieldKind::Abstract, a);
    term_freqs.insert(FieldKind::Claims, c);

    TokenizedDocument {
        relpath: record.relpath.clone(),
        text_t: record.title.clone(),
        text_a: record.abstract_.clone(),
        text_c: record.claims.clone(),
        len_t,
        len_a,
        len_c,
        term_freqs,
    }
}

fn count_terms(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
