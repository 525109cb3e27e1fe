// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A field-weighted BM25F text retrieval engine over patent-style JSON
//! documents with TITLE, ABSTRACT, and CLAIMS fields.
//!
//! [`build`] constructs an index from a corpus directory; [`search`]
//! loads a committed index and answers bracketed-modifier queries
//! against it ([`query`] parses the modifier syntax, [`resolve`]
//! computes candidate document sets, [`scoring`] ranks them with BM25F,
//! and [`snippet`] produces highlighted result windows).

pub mod build;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod index;
pub mod postings;
pub mod query;
pub mod resolve;
pub mod scoring;
pub mod search;
pub mod snippet;
pub mod tokenizer;
pub mod types;

pub use error::{EngineError, Result};
pub use search::{ScoredDoc, SearchEngine, SearchResult};
