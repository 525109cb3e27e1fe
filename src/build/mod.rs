// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build pipeline: drives the corpus reader and tokenizer, accumulates
//! per-field postings, and commits the three index artifacts to disk.

pub mod document;

use crate::corpus::read_corpus;
use crate::error::{EngineError, Result};
use crate::types::{DocRecord, DocTable, FieldKind, IndexMetadata, PostingEntry, PostingsRef, TermEntry};
use document::{tokenize_document, TokenizedDocument};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summary returned after a successful build, printed by the CLI.
#[derive(Debug)]
pub struct BuildSummary {
    pub total_docs: u32,
    pub total_terms: usize,
    pub parse_failures: usize,
}

/// Reads every `*.json` document under `input_dir`, builds the inverted
/// index, and writes `doc_table.json`, `term_dict.json`, and the three
/// per-field postings files into `output_dir`.
pub fn build_index(input_dir: &Path, output_dir: &Path) -> Result<BuildSummary> {
    std::fs::create_dir_all(output_dir)?;

    let (records, failures) = read_corpus(input_dir);
    for failure in &failures {
        eprintln!("skipping unreadable document: {failure}");
    }

    let progress = progress::start(records.len() as u64);
    let tokenized = tokenize_all(&records, &progress);
    progress::finish(progress);

    let mut accumulator = Accumulator::new();
    for (doc_id, doc) in tokenized.into_iter().enumerate() {
        accumulator.add_document(doc_id as u32, doc);
    }

    let total_docs = accumulator.docs.len() as u32;
    let metadata = accumulator.metadata();

    let term_dict = write_postings(output_dir, &accumulator)?;
    let total_terms = term_dict.len();

    let doc_table = DocTable {
        metadata,
        documents: accumulator
            .docs
            .into_iter()
            .enumerate()
            .map(|(id, rec)| (id.to_string(), rec))
            .collect(),
    };
    write_json(&output_dir.join("doc_table.json"), &doc_table)?;
    write_json(&output_dir.join("term_dict.json"), &term_dict)?;

    eprintln!(
        "indexing complete: {total_docs} documents processed, {total_terms} distinct terms, output in {}",
        output_dir.display()
    );

    Ok(BuildSummary {
        total_docs,
        total_terms,
        parse_failures: failures.len(),
    })
}

#[cfg(feature = "parallel")]
fn tokenize_all(
    records: &[crate::corpus::CorpusRecord],
    progress: &progress::Handle,
) -> Vec<TokenizedDocument> {
    records
        .par_iter()
        .map(|record| {
            let doc = tokenize_document(record);
            progress::tick(progress);
            doc
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn tokenize_all(
    records: &[crate::corpus::CorpusRecord],
    progress: &progress::Handle,
) -> Vec<TokenizedDocument> {
    records
        .iter()
        .map(|record| {
            let doc = tokenize_document(record);
            progress::tick(progress);
            doc
        })
        .collect()
}

/// Thin wrapper so the rest of the build pipeline doesn't need to know
/// whether `indicatif` is compiled in; with the `parallel` feature off
/// this is a no-op.
#[cfg(feature = "parallel")]
mod progress {
    pub type Handle = indicatif::ProgressBar;

    pub fn start(total: u64) -> Handle {
        let bar = indicatif::ProgressBar::new(total);
        bar.set_style(
            indicatif::ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar.set_message("tokenizing documents");
        bar
    }

    pub fn tick(handle: &Handle) {
        handle.inc(1);
    }

    pub fn finish(handle: Handle) {
        handle.finish_with_message("tokenization complete");
    }
}

#[cfg(not(feature = "parallel"))]
mod progress {
    pub type Handle = ();

    pub fn start(_total: u64) -> Handle {}

    pub fn tick(_handle: &Handle) {}

    pub fn finish(_handle: Handle) {}
}

/// In-memory accumulator: per-field term -> postings, plus the doc table.
struct Accumulator {
    docs: Vec<DocRecord>,
    /// field -> term -> postings (in doc-id order, since documents are
    /// folded in sequentially).
    postings: HashMap<FieldKind, BTreeMap<String, Vec<PostingEntry>>>,
}

impl Accumulator {
    fn new() -> Self {
        let mut postings = HashMap::with_capacity(3);
        for field in FieldKind::ALL {
            postings.insert(field, BTreeMap::new());
        }
        Accumulator {
            docs: Vec::new(),
            postings,
        }
    }

    fn add_document(&mut self, doc_id: u32, doc: TokenizedDocument) {
        for field in FieldKind::ALL {
            let freqs = &doc.term_freqs[&field];
            let field_postings = self.postings.get_mut(&field).unwrap();
            for (term, tf) in freqs {
                field_postings.entry(term.clone()).or_default().push(PostingEntry {
                    doc_id: crate::types::DocId::new(doc_id),
                    tf: *tf,
                });
            }
        }
        self.docs.push(DocRecord {
            relpath: doc.relpath,
            len_t: doc.len_t,
            len_a: doc.len_a,
            len_c: doc.len_c,
            text_t: doc.text_t,
            text_a: doc.text_a,
            text_c: doc.text_c,
        });
    }

    fn metadata(&self) -> IndexMetadata {
        let n = self.docs.len().max(1) as f64;
        let total_docs = self.docs.len() as u32;
        let sum = |f: fn(&DocRecord) -> u32| -> f64 {
            self.docs.iter().map(|d| f(d) as f64).sum()
        };
        IndexMetadata {
            total_docs,
            avgdl_t: sum(|d| d.len_t) / n,
            avgdl_a: sum(|d| d.len_a) / n,
            avgdl_c: sum(|d| d.len_c) / n,
        }
    }
}

fn write_postings(
    output_dir: &Path,
    accumulator: &Accumulator,
) -> Result<BTreeMap<String, TermEntry>> {
    let mut term_dict: BTreeMap<String, TermEntry> = BTreeMap::new();

    for field in FieldKind::ALL {
        let path = output_dir.join(field.postings_filename());
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        let mut offset: u64 = 0;

        let field_postings = &accumulator.postings[&field];
        for (term, entries) in field_postings {
            let written = crate::postings::encode_postings(&mut writer, entries)?;
            let entry = term_dict.entry(term.clone()).or_default();
            entry.set_field_ref(
                field,
                PostingsRef {
                    offset,
                    length: entries.len() as u32,
                },
            );
            offset += written;
        }
    }

    for (term, entry) in term_dict.iter_mut() {
        let mut doc_ids: HashSet<u32> = HashSet::new();
        for field in FieldKind::ALL {
            if let Some(field_postings) = accumulator.postings.get(&field) {
                if let Some(entries) = field_postings.get(term) {
                    doc_ids.extend(entries.iter().map(|p| p.doc_id.get()));
                }
            }
        }
        entry.df = doc_ids.len() as u32;
    }

    Ok(term_dict)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(EngineError::Io)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
