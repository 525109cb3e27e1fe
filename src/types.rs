// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core value types shared across the index builder, loader, and search engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, zero-based document identifier assigned in corpus traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl DocId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three weighted text fields a document is indexed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Title,
    Abstract,
    Claims,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Title, FieldKind::Abstract, FieldKind::Claims];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Title => "TITLE",
            FieldKind::Abstract => "ABSTRACT",
            FieldKind::Claims => "CLAIMS",
        }
    }

    #[must_use]
    pub fn tag(self) -> char {
        match self {
            FieldKind::Title => 'T',
            FieldKind::Abstract => 'A',
            FieldKind::Claims => 'C',
        }
    }

    #[must_use]
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag.to_ascii_uppercase() {
            'T' => Some(FieldKind::Title),
            'A' => Some(FieldKind::Abstract),
            'C' => Some(FieldKind::Claims),
            _ => None,
        }
    }

    /// BM25F field weight `w_F`.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            FieldKind::Title => 2.5,
            FieldKind::Abstract => 1.5,
            FieldKind::Claims => 1.1,
        }
    }

    /// BM25F length-normalization parameter `b_F`.
    #[must_use]
    pub fn b(self) -> f64 {
        match self {
            FieldKind::Title => 0.3,
            FieldKind::Abstract => 0.75,
            FieldKind::Claims => 0.8,
        }
    }

    /// Postings file name for this field within an index directory.
    #[must_use]
    pub fn postings_filename(self) -> &'static str {
        match self {
            FieldKind::Title => "postings_T.bin",
            FieldKind::Abstract => "postings_A.bin",
            FieldKind::Claims => "postings_C.bin",
        }
    }
}

/// A single posting: the document a term occurred in, and how many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEntry {
    pub doc_id: DocId,
    pub tf: u32,
}

/// Byte-range reference into a field's postings stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingsRef {
    pub offset: u64,
    pub length: u32,
}

/// Per-term dictionary entry: global document frequency plus an optional
/// postings reference for each field the term occurs in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermEntry {
    pub df: u32,
    #[serde(rename = "T", skip_serializing_if = "Option::is_none")]
    pub title: Option<PostingsRef>,
    #[serde(rename = "A", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<PostingsRef>,
    #[serde(rename = "C", skip_serializing_if = "Option::is_none")]
    pub claims: Option<PostingsRef>,
}

impl TermEntry {
    #[must_use]
    pub fn field_ref(&self, field: FieldKind) -> Option<PostingsRef> {
        match field {
            FieldKind::Title => self.title,
            FieldKind::Abstract => self.abstract_,
            FieldKind::Claims => self.claims,
        }
    }

    pub fn set_field_ref(&mut self, field: FieldKind, r: PostingsRef) {
        match field {
            FieldKind::Title => self.title = Some(r),
            FieldKind::Abstract => self.abstract_ = Some(r),
            FieldKind::Claims => self.claims = Some(r),
        }
    }
}

/// One document record as stored in the doc table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocRecord {
    pub relpath: String,
    pub len_t: u32,
    pub len_a: u32,
    pub len_c: u32,
    pub text_t: String,
    pub text_a: String,
    pub text_c: String,
}

impl DocRecord {
    #[must_use]
    pub fn len_for(&self, field: FieldKind) -> u32 {
        match field {
            FieldKind::Title => self.len_t,
            FieldKind::Abstract => self.len_a,
            FieldKind::Claims => self.len_c,
        }
    }

    #[must_use]
    pub fn text_for(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Title => &self.text_t,
            FieldKind::Abstract => &self.text_a,
            FieldKind::Claims => &self.text_c,
        }
    }
}

/// Index-wide aggregate statistics computed once at build time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub total_docs: u32,
    pub avgdl_t: f64,
    pub avgdl_a: f64,
    pub avgdl_c: f64,
}

impl IndexMetadata {
    #[must_use]
    pub fn avgdl_for(self, field: FieldKind) -> f64 {
        match field {
            FieldKind::Title => self.avgdl_t,
            FieldKind::Abstract => self.avgdl_a,
            FieldKind::Claims => self.avgdl_c,
        }
    }
}

/// The full doc table artifact: metadata plus every document record, keyed
/// by its stringified doc id (matching the on-disk JSON shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocTable {
    pub metadata: IndexMetadata,
    pub documents: std::collections::BTreeMap<String, DocRecord>,
}
