// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A minimal, swappable term extractor.
//!
//! Korean syllable runs are kept as-is (the script already carries word
//! identity); Latin/digit runs are lower-cased and kept unless they're
//! purely numeric, which is noise for this corpus (patent ids, dates).

use regex::Regex;
use std::sync::OnceLock;

fn korean_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[가-힣]+").unwrap())
}

fn latin_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9_-]*").unwrap())
}

fn numeric_only_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// Splits `text` into content terms. Pure and deterministic; never emits
/// an empty token.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    for word in text.split_whitespace() {
        for m in korean_pattern().find_iter(word) {
            terms.push(m.as_str().to_string());
        }
        for m in latin_pattern().find_iter(word) {
            let candidate = m.as_str();
            if !numeric_only_pattern().is_match(candidate) {
                terms.push(candidate.to_lowercase());
            }
        }
    }
    terms
}
