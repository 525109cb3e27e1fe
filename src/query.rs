// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parses the bracketed-modifier query syntax into a validated descriptor.

use crate::error::EngineError;
use crate::types::FieldKind;
use std::collections::HashSet;

/// A parsed, validated query.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub verbose: bool,
    pub and_mode: bool,
    pub phrase_mode: bool,
    pub fields: HashSet<FieldKind>,
    pub query_text: String,
}

/// Parses and validates a raw query line. Unknown tags, or an illegal
/// combination of modifiers, are reported as [`EngineError::InvalidQuery`].
pub fn parse(raw: &str) -> Result<ParsedQuery, EngineError> {
    let mut verbose = false;
    let mut and_mode = false;
    let mut phrase_mode = false;
    let mut fields: HashSet<FieldKind> = HashSet::new();
    let mut invalid_tags: Vec<String> = Vec::new();

    let mut rest = raw.trim();
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(end) = stripped.find(']') else {
            break;
        };
        let tag = &stripped[..end];
        rest = stripped[end + 1..].trim_start();

        match tag.to_ascii_uppercase().as_str() {
            "VERBOSE" | "V" => verbose = true,
            "AND" | "A" => and_mode = true,
            "PHRASE" | "P" => phrase_mode = true,
            other if other.starts_with("FIELD=") => {
                let value = &other["FIELD=".len()..];
                match FieldKind::from_tag(value.chars().next().unwrap_or(' ')) {
                    Some(field) if value.len() == 1 => {
                        fields.insert(field);
                    }
                    _ => invalid_tags.push(tag.to_string()),
                }
            }
            _ => invalid_tags.push(tag.to_string()),
        }
    }

    if !invalid_tags.is_empty() {
        return Err(EngineError::InvalidQuery(format!(
            "unknown query tag(s): {}",
            invalid_tags.join(", ")
        )));
    }
    if phrase_mode && and_mode {
        return Err(EngineError::InvalidQuery(
            "[PHRASE] and [AND] cannot be combined".to_string(),
        ));
    }
    if phrase_mode && (fields.contains(&FieldKind::Abstract) || fields.contains(&FieldKind::Claims)) {
        return Err(EngineError::InvalidQuery(
            "[PHRASE] only searches the TITLE field".to_string(),
        ));
    }

    if fields.is_empty() {
        fields = FieldKind::ALL.into_iter().collect();
    }

    Ok(ParsedQuery {
        verbose,
        and_mode,
        phrase_mode,
        fields,
        query_text: rest.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_query_defaults_to_or_over_all_fields() {
        let q = parse("quantum radar").unwrap();
        assert!(!q.verbose && !q.and_mode && !q.phrase_mode);
        assert_eq!(q.fields.len(), 3);
        assert_eq!(q.query_text, "quantum radar");
    }

    #[test]
    fn recognizes_short_and_long_tags() {
        let q = parse("[V][A] alpha beta").unwrap();
        assert!(q.verbose && q.and_mode);
        let q2 = parse("[VERBOSE][AND] alpha beta").unwrap();
        assert!(q2.verbose && q2.and_mode);
    }

    #[test]
    fn field_tags_are_repeatable_and_union() {
        let q = parse("[FIELD=T][FIELD=A] quantum").unwrap();
        assert_eq!(q.fields.len(), 2);
        assert!(q.fields.contains(&FieldKind::Title));
        assert!(q.fields.contains(&FieldKind::Abstract));
    }

    #[test]
    fn bare_field_letter_tags_are_rejected() {
        // `[A]` is reserved for AND; only bare T/C collide with a field letter.
        assert!(parse("[T] quantum").is_err());
        assert!(parse("[C] quantum").is_err());
    }

    #[test]
    fn short_and_tag_means_and_not_field() {
        let q = parse("[A] alpha beta").unwrap();
        assert!(q.and_mode);
        assert_eq!(q.fields.len(), 3);
    }

    #[test]
    fn phrase_and_and_conflict_is_rejected() {
        assert!(parse("[PHRASE][AND] quick brown").is_err());
    }

    #[test]
    fn phrase_with_non_title_field_is_rejected() {
        assert!(parse("[PHRASE][FIELD=A] quick brown").is_err());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(parse("[BOGUS] quantum").is_err());
    }
}
