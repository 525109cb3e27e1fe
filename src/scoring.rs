// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25F scoring: field-weighted term frequency with per-field length
//! normalization.

use crate::error::Result;
use crate::index::Index;
use crate::types::{DocId, FieldKind};

const K1: f64 = 1.1;

/// `idf(q) = ln((N - df + 0.5) / (df + 0.5) + 1)`.
#[must_use]
pub fn idf(total_docs: u32, df: u32) -> f64 {
    let n = f64::from(total_docs);
    let df = f64::from(df);
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Per-field normalized term frequency.
#[must_use]
pub fn normalized_tf(tf: u32, field: FieldKind, doc_len: u32, avgdl: f64) -> f64 {
    let tf = f64::from(tf);
    if avgdl <= 0.0 {
        return tf;
    }
    let b = field.b();
    tf / ((1.0 - b) + b * (f64::from(doc_len) / avgdl))
}

/// Scores a single document against the tokenized query terms, considering
/// only `fields`.
pub fn score_document(
    index: &Index,
    doc_id: DocId,
    terms: &[String],
    fields: &[FieldKind],
) -> Result<f64> {
    let stats = index.stats();
    let total_docs = index.total_docs() as u32;
    let Some(doc) = index.get_doc(doc_id) else {
        return Ok(0.0);
    };

    let mut score = 0.0;
    for term in terms {
        let Some(df) = index.get_df(term) else {
            continue;
        };
        let term_idf = idf(total_docs, df);

        let mut pseudo_tf = 0.0;
        for &field in fields {
            let postings = index.get_postings(term, field)?;
            let Some(&tf) = postings.get(&doc_id) else {
                continue;
            };
            let ntf = normalized_tf(tf, field, doc.len_for(field), stats.avgdl_for(field));
            pseudo_tf += field.weight() * ntf;
        }

        if pseudo_tf > 0.0 {
            score += term_idf * ((K1 + 1.0) * pseudo_tf) / (K1 + pseudo_tf);
        }
    }

    Ok(score)
}
