// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the index builder, loader, and query engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize index artifact: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("index file missing or unreadable: {0}")]
    MissingIndexFile(std::path::PathBuf),

    #[error("incomplete posting read at offset {offset} (expected {expected} bytes, got {got})")]
    IncompletePostingRead {
        offset: u64,
        expected: usize,
        got: usize,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("failed to parse document {path}: {reason}")]
    DocumentParseError { path: std::path::PathBuf, reason: String },
}
