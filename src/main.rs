// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `jiphyeon` CLI: build an index, then search it interactively.

use clap::Parser;
use jiphyeon::cli::{Cli, Commands};
use jiphyeon::search::{ScoredDoc, SearchEngine, SearchResult};
use jiphyeon::snippet::Snippet;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { input, output } => {
            let summary = jiphyeon::build::build_index(&input, &output)?;
            println!(
                "built index: {} documents, {} distinct terms",
                summary.total_docs, summary.total_terms
            );
        }
        Commands::Search { index_dir } => {
            let engine = SearchEngine::open(&index_dir)?;
            run_search_loop(&engine)?;
        }
    }

    Ok(())
}

fn run_search_loop(engine: &SearchEngine) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("검색어를 입력하세요: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        match engine.search(line) {
            Ok(result) => render_result(&result),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

fn render_result(result: &SearchResult) {
    println!("RESULT:");
    println!("검색어 입력: {}", result.query_text);
    println!("총 {}개 문서 검색", result.total_matches);
    println!("상위 {}개 문서:", result.top.len().min(5));
    for doc in &result.top {
        render_top_line(doc);
    }

    if !result.snippets.is_empty() {
        for (doc, snippets) in result.top.iter().zip(result.snippets.iter()) {
            println!("---");
            println!("  {}", doc.relpath);
            render_snippets(snippets);
        }
    }
}

fn render_top_line(doc: &ScoredDoc) {
    println!("  {}  {:.2}", doc.relpath, doc.score);
}

fn render_snippets(snippets: &[Snippet]) {
    for snippet in snippets {
        println!("  [{}] {}", snippet.field.label(), snippet.text);
    }
}
