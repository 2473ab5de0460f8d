//! Reference String Parser: turns one free-text reference line into a
//! [`ReferenceRecord`].
//!
//! Input has no fixed grammar, e.g.
//! `Jane Doe, Acme Corp, jane@acme.com, 555-123-4567, worked together as manager`.
//! The parser never fails: when it cannot work a line out it returns a
//! best-effort record carrying the start of the line as the name.

use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::fallback::leading_chars;
use crate::extraction::patterns::{email_regex, phone_regex};
use crate::models::reference::{ReferenceRecord, UNKNOWN_REFERENCE};

/// Characters of the raw line kept as the name of a degraded record.
pub const DEGRADED_NAME_CHARS: usize = 100;

/// Separators tried in order; the first one present splits the line.
const SEPARATORS: &[char] = &['|', ',', ';', '-'];

const RELATIONSHIP_KEYWORDS: &[&str] = &[
    "relationship",
    "relation",
    "worked",
    "manager",
    "supervisor",
    "colleague",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmbiguity {
    #[error("contact patterns unavailable")]
    PatternsUnavailable,
}

/// Parses a reference line, degrading instead of failing.
pub fn parse_reference(line: &str) -> ReferenceRecord {
    match try_parse_reference(line) {
        Ok(record) => {
            debug!("Parsed reference: {:?}", record);
            record
        }
        Err(e) => {
            warn!("Could not parse reference line ({e}); keeping raw text as name");
            degraded_record(line)
        }
    }
}

pub fn try_parse_reference(line: &str) -> Result<ReferenceRecord, ParseAmbiguity> {
    let mut text = line.trim().to_string();

    let email_re = email_regex().ok_or(ParseAmbiguity::PatternsUnavailable)?;
    let phone_re = phone_regex().ok_or(ParseAmbiguity::PatternsUnavailable)?;

    let email = take_first_match(&mut text, |t| email_re.find(t).map(|m| m.range()));
    let phone_number = take_first_match(&mut text, |t| phone_re.find(t).map(|m| m.range()));

    let segments = split_segments(&text);
    let mut segments = segments.into_iter();

    let mut name = String::new();
    let mut company = String::new();
    let mut relationship = String::new();

    if let Some(first) = segments.next() {
        match first.split_once(',') {
            Some((n, c)) => {
                name = n.trim().to_string();
                company = c.trim().to_string();
            }
            None => name = first,
        }
    }

    for segment in segments {
        let lower = segment.to_lowercase();
        if RELATIONSHIP_KEYWORDS.iter().any(|k| lower.contains(k)) {
            relationship = segment;
        } else if company.is_empty() && segment.chars().count() > 2 {
            company = segment;
        }
    }

    let name = keep_words(&name, |w| !w.contains('@'));
    let company = keep_words(&company, |w| {
        !w.contains('@') && !w.chars().any(|c| c.is_ascii_digit())
    });

    Ok(ReferenceRecord {
        name: if name.is_empty() {
            UNKNOWN_REFERENCE.to_string()
        } else {
            name
        },
        email,
        phone_number,
        company,
        relationship,
    })
}

/// Removes the first match from `text` and returns it trimmed, or "".
fn take_first_match<F>(text: &mut String, find: F) -> String
where
    F: Fn(&str) -> Option<std::ops::Range<usize>>,
{
    match find(text.as_str()) {
        Some(range) => {
            let found = text[range.clone()].trim().to_string();
            text.replace_range(range, "");
            found
        }
        None => String::new(),
    }
}

/// Splits on the first separator present, dropping empty pieces. A line
/// without any separator is one segment.
fn split_segments(text: &str) -> Vec<String> {
    let pieces: Vec<String> = match SEPARATORS.iter().find(|s| text.contains(**s)) {
        Some(sep) => text.split(*sep).map(|p| p.trim().to_string()).collect(),
        None => vec![text.trim().to_string()],
    };
    pieces.into_iter().filter(|p| !p.is_empty()).collect()
}

fn keep_words<F>(text: &str, keep: F) -> String
where
    F: Fn(&str) -> bool,
{
    text.split_whitespace()
        .filter(|w| keep(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn degraded_record(line: &str) -> ReferenceRecord {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ReferenceRecord::named(UNKNOWN_REFERENCE)
    } else {
        ReferenceRecord::named(leading_chars(trimmed, DEGRADED_NAME_CHARS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_line() {
        let r = parse_reference("Jane Doe, Acme Corp, jane@acme.com, 555-123-4567");
        assert_eq!(r.name, "Jane Doe");
        assert_eq!(r.company, "Acme Corp");
        assert_eq!(r.email, "jane@acme.com");
        assert_eq!(r.phone_number, "555-123-4567");
        assert_eq!(r.relationship, "");
    }

    #[test]
    fn test_relationship_segment() {
        let r = parse_reference(
            "Jane Doe, Acme Corp, jane@acme.com, 555-123-4567, worked together as manager",
        );
        assert_eq!(r.company, "Acme Corp");
        assert_eq!(r.relationship, "worked together as manager");
    }

    #[test]
    fn test_pipe_separator_with_name_and_company() {
        let r = parse_reference("Bob Lee, Globex | Direct Supervisor | bob@globex.com");
        assert_eq!(r.name, "Bob Lee");
        assert_eq!(r.company, "Globex");
        assert_eq!(r.relationship, "Direct Supervisor");
        assert_eq!(r.email, "bob@globex.com");
    }

    #[test]
    fn test_semicolon_separator() {
        let r = parse_reference("Ann Lim; Initech; colleague");
        assert_eq!(r.name, "Ann Lim");
        assert_eq!(r.company, "Initech");
        assert_eq!(r.relationship, "colleague");
    }

    #[test]
    fn test_hyphen_separator() {
        let r = parse_reference("Carl Ng - Umbrella Ltd");
        assert_eq!(r.name, "Carl Ng");
        assert_eq!(r.company, "Umbrella Ltd");
    }

    #[test]
    fn test_no_separator_is_name_only() {
        let r = parse_reference("Dana Scully");
        assert_eq!(r.name, "Dana Scully");
        assert_eq!(r.company, "");
    }

    #[test]
    fn test_short_segment_not_used_as_company() {
        let r = parse_reference("Eve Adams, HR");
        assert_eq!(r.name, "Eve Adams");
        assert_eq!(r.company, "");
    }

    #[test]
    fn test_company_drops_digit_and_at_tokens() {
        let r = parse_reference("Frank Ocean | Acme 2020 Corp x@y | supervisor");
        assert_eq!(r.company, "Acme Corp");
    }

    #[test]
    fn test_only_first_email_is_taken() {
        let r = parse_reference("Gus Fring | gus@pollos.com | other@pollos.com");
        assert_eq!(r.email, "gus@pollos.com");
        assert_eq!(r.name, "Gus Fring");
    }

    #[test]
    fn test_at_symbols_only_resolve_to_sentinel() {
        assert_eq!(parse_reference("@@@").name, UNKNOWN_REFERENCE);
    }

    #[test]
    fn test_year_range_kept_out_of_phone() {
        let r = parse_reference("Hank Hill | Strickland Propane 2020-2022");
        assert_eq!(r.phone_number, "");
        assert_eq!(r.company, "Strickland Propane");
    }

    #[test]
    fn test_long_line_is_still_parsed() {
        let line = format!(
            "Jane Doe, Acme Corp, jane@acme.com, 555-123-4567, worked together as manager {}",
            "on the regional rollout ".repeat(40)
        );
        assert!(line.chars().count() > 1000);

        let r = parse_reference(&line);
        assert_eq!(r.name, "Jane Doe");
        assert_eq!(r.company, "Acme Corp");
        assert_eq!(r.email, "jane@acme.com");
        assert_eq!(r.phone_number, "555-123-4567");
        assert!(r.relationship.starts_with("worked together as manager"));
    }

    #[test]
    fn test_degraded_record_keeps_line_start() {
        let line = format!("Ivy Wu {}", "x".repeat(200));
        let r = degraded_record(&line);
        assert_eq!(r.name.chars().count(), DEGRADED_NAME_CHARS);
        assert!(r.name.starts_with("Ivy Wu"));
        assert_eq!(r.email, "");
    }

    #[test]
    fn test_empty_line_is_sentinel() {
        assert_eq!(parse_reference("   ").name, UNKNOWN_REFERENCE);
        assert_eq!(degraded_record("").name, UNKNOWN_REFERENCE);
    }
}
