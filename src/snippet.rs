// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet window selection and highlighting for OR, AND, and PHRASE
//! result display.

use crate::types::FieldKind;
use std::collections::HashSet;

/// Fixed snippet window width, in characters.
pub const WINDOW: usize = 80;

/// A single rendered snippet line, e.g. `[TITLE] ...<<quantum>> key...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub field: FieldKind,
    pub text: String,
}

/// Finds the best window (by count of distinct covered terms, earliest
/// start breaking ties) in `text` for the given query terms, returning
/// `(start, covered_terms)`. Returns `None` if `text` contains none of the
/// terms at all, in which case callers fall back to a leading window.
fn best_window(text: &[char], terms: &[String]) -> (usize, HashSet<usize>) {
    let len = text.len();
    if len == 0 {
        return (0, HashSet::new());
    }

    let lower: String = text.iter().collect::<String>().to_lowercase();
    let lower_chars: Vec<char> = lower.chars().collect();

    let mut occurrences: Vec<(usize, usize, usize)> = Vec::new(); // (start, end, term_idx)
    for (idx, term) in terms.iter().enumerate() {
        let term_lower = term.to_lowercase();
        let term_chars: Vec<char> = term_lower.chars().collect();
        if term_chars.is_empty() {
            continue;
        }
        let mut start = 0;
        while start + term_chars.len() <= lower_chars.len() {
            if lower_chars[start..start + term_chars.len()] == term_chars[..] {
                occurrences.push((start, start + term_chars.len(), idx));
                start += 1;
            } else {
                start += 1;
            }
        }
    }

    if occurrences.is_empty() {
        return (0, HashSet::new());
    }

    let window = WINDOW.min(len);
    let mut best_start = 0;
    let mut best_covered: HashSet<usize> = HashSet::new();

    for &(occ_start, _, _) in &occurrences {
        let candidate_start = clamp_window_start(occ_start, window, len);
        let candidate_end = candidate_start + window;
        let covered: HashSet<usize> = occurrences
            .iter()
            .filter(|&&(s, e, _)| s >= candidate_start && e <= candidate_end)
            .map(|&(_, _, idx)| idx)
            .collect();
        if covered.len() > best_covered.len()
            || (covered.len() == best_covered.len() && candidate_start < best_start)
        {
            best_start = candidate_start;
            best_covered = covered;
        }
    }

    (best_start, best_covered)
}

fn clamp_window_start(occ_start: usize, window: usize, len: usize) -> usize {
    if len <= window {
        return 0;
    }
    let desired = occ_start.saturating_sub(window / 4);
    desired.min(len - window)
}

/// Wraps every occurrence of any term in `terms` in `<<...>>`, scanning
/// left to right and preferring the longest match starting at each
/// position so overlapping terms never produce overlapping markup.
///
/// A span that is already wrapped in `<<...>>` is copied through verbatim
/// rather than rescanned, so highlighting an already-highlighted snippet
/// is a no-op (running it twice yields the same string).
#[must_use]
pub fn highlight(text: &str, terms: &[String]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = text.to_lowercase().chars().collect();
    let mut sorted_terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    sorted_terms.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    sorted_terms.retain(|t| !t.is_empty());

    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    'outer: while i < chars.len() {
        if chars[i] == '<' && chars.get(i + 1) == Some(&'<') {
            if let Some(close) = find_markup_close(&chars, i + 2) {
                out.extend(&chars[i..=close]);
                i = close + 1;
                continue;
            }
        }

        for term in &sorted_terms {
            let term_chars: Vec<char> = term.chars().collect();
            if i + term_chars.len() <= lower.len() && lower[i..i + term_chars.len()] == term_chars[..] {
                out.push_str("<<");
                out.extend(&chars[i..i + term_chars.len()]);
                out.push_str(">>");
                i += term_chars.len();
                continue 'outer;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Finds the index of the closing `>` of the first `>>` at or after `from`.
fn find_markup_close(chars: &[char], from: usize) -> Option<usize> {
    let mut j = from;
    while j + 1 < chars.len() {
        if chars[j] == '>' && chars[j + 1] == '>' {
            return Some(j + 1);
        }
        j += 1;
    }
    None
}

fn window_text(text: &str, start: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let end = (start + WINDOW).min(chars.len());
    chars[start..end].iter().collect()
}

/// OR-mode snippet: a single best window from whichever active field
/// covers the most distinct query terms.
#[must_use]
pub fn or_snippet(field_texts: &[(FieldKind, &str)], terms: &[String]) -> Option<Snippet> {
    let mut best: Option<(FieldKind, usize, usize)> = None; // (field, start, covered_count)
    for &(field, text) in field_texts {
        let chars: Vec<char> = text.chars().collect();
        let (start, covered) = best_window(&chars, terms);
        let better = match &best {
            None => true,
            Some((_, _, best_count)) => covered.len() > *best_count,
        };
        if better {
            best = Some((field, start, covered.len()));
        }
    }
    best.map(|(field, start, _)| {
        let text = field_texts.iter().find(|(f, _)| *f == field).unwrap().1;
        Snippet {
            field,
            text: highlight(&window_text(text, start), terms),
        }
    })
}

/// AND-mode snippets: one per field, ordered by descending term coverage,
/// stopping once every query term has been shown at least once.
#[must_use]
pub fn and_snippets(field_texts: &[(FieldKind, &str)], terms: &[String]) -> Vec<Snippet> {
    let mut ranked: Vec<(FieldKind, usize, HashSet<usize>)> = field_texts
        .iter()
        .map(|&(field, text)| {
            let chars: Vec<char> = text.chars().collect();
            let (start, covered) = best_window(&chars, terms);
            (field, start, covered)
        })
        .collect();
    ranked.sort_by(|a, b| b.2.len().cmp(&a.2.len()));

    let mut shown: HashSet<usize> = HashSet::new();
    let mut out = Vec::new();
    for (field, start, covered) in ranked {
        if covered.is_empty() {
            continue;
        }
        if covered.iter().any(|t| !shown.contains(t)) {
            let text = field_texts.iter().find(|(f, _)| *f == field).unwrap().1;
            out.push(Snippet {
                field,
                text: highlight(&window_text(text, start), terms),
            });
            shown.extend(covered);
        }
        if shown.len() >= terms.len() {
            break;
        }
    }
    out
}

/// PHRASE-mode snippet: a window centered on the exact match inside the
/// TITLE text.
#[must_use]
pub fn phrase_snippet(title_text: &str, query_text: &str) -> Snippet {
    let chars: Vec<char> = title_text.chars().collect();
    let lower_title = title_text.to_lowercase();
    let lower_query = query_text.to_lowercase();

    let start = match lower_title.find(&lower_query) {
        Some(byte_pos) => {
            let char_pos = lower_title[..byte_pos].chars().count();
            let match_len = lower_query.chars().count();
            let center = char_pos + match_len / 2;
            let window = WINDOW.min(chars.len());
            let desired = center.saturating_sub(window / 2);
            if chars.len() <= window {
                0
            } else {
                desired.min(chars.len() - window)
            }
        }
        None => 0,
    };

    let terms = vec![query_text.to_string()];
    Snippet {
        field: FieldKind::Title,
        text: highlight(&window_text(title_text, start), &terms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_wraps_every_occurrence() {
        let out = highlight("quantum radar uses quantum signals", &["quantum".to_string()]);
        assert_eq!(out.matches("<<quantum>>").count(), 2);
    }

    #[test]
    fn highlight_prefers_longest_match_first() {
        let out = highlight("quantum", &["quantum".to_string(), "quant".to_string()]);
        assert_eq!(out, "<<quantum>>");
    }

    #[test]
    fn highlight_is_idempotent() {
        let once = highlight("quantum radar", &["quantum".to_string()]);
        let twice = highlight(&once, &["quantum".to_string()]);
        assert_eq!(once, twice);
    }

    #[test]
    fn or_snippet_picks_field_with_more_covered_terms() {
        let title = "short";
        let abstract_text = "this field mentions quantum and radar together";
        let terms = vec!["quantum".to_string(), "radar".to_string()];
        let snippet = or_snippet(
            &[(FieldKind::Title, title), (FieldKind::Abstract, abstract_text)],
            &terms,
        )
        .unwrap();
        assert_eq!(snippet.field, FieldKind::Abstract);
        assert!(snippet.text.contains("<<quantum>>"));
        assert!(snippet.text.contains("<<radar>>"));
    }

    #[test]
    fn phrase_snippet_centers_on_match() {
        let title = "a".repeat(100) + "quick brown fox" + &"b".repeat(100);
        let snippet = phrase_snippet(&title, "quick brown");
        assert!(snippet.text.contains("<<quick brown>>"));
        assert!(snippet.text.chars().count() <= WINDOW);
    }

    #[test]
    fn and_snippets_stop_once_all_terms_covered() {
        let terms = vec!["alpha".to_string(), "beta".to_string()];
        let t = "alpha appears here";
        let a = "beta appears here";
        let snippets = and_snippets(&[(FieldKind::Title, t), (FieldKind::Abstract, a)], &terms);
        assert_eq!(snippets.len(), 2);
    }
}
