// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the `jiphyeon` command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jiphyeon", version, about = "Field-weighted BM25F text retrieval over patent document corpora")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a search index from a directory of patent JSON documents.
    Index {
        /// Root directory to walk for `*.json` documents.
        #[arg(long)]
        input: PathBuf,

        /// Directory to write doc_table.json, term_dict.json, and the
        /// postings files into.
        #[arg(long)]
        output: PathBuf,
    },

    /// Open a built index and enter an interactive query loop.
    Search {
        /// Directory containing a previously built index.
        index_dir: PathBuf,
    },
}
