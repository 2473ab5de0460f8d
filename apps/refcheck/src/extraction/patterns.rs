//! Shared contact patterns (lazy-initialized).
//!
//! Getters return `None` only if a pattern fails to compile; callers treat
//! that as "nothing found" rather than panicking.

use std::sync::OnceLock;

use regex::Regex;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static LEADING_NAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

pub fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").ok())
        .as_ref()
}

/// North American 3-3-4 numbers with optional `+NN` prefix, parentheses and
/// space/dot/hyphen separators, plus Australian mobiles (`04XX XXX XXX`,
/// `+61 4XX XXX XXX`). Four-digit groups never satisfy a three-digit slot,
/// so year ranges like `2020-2022` cannot match.
pub fn phone_regex() -> Option<&'static Regex> {
    PHONE_REGEX
        .get_or_init(|| {
            Regex::new(
                r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b|(?:\+61\s?|\b0)4\d{2}\s?\d{3}\s?\d{3}\b",
            )
            .ok()
        })
        .as_ref()
}

/// Two or three capitalized words opening a line, e.g. `Jane Doe` or
/// `Mary Ann Smith`.
pub fn leading_name_regex() -> Option<&'static Regex> {
    LEADING_NAME_REGEX
        .get_or_init(|| Regex::new(r"(?m)^([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2})(?:\s|$)").ok())
        .as_ref()
}
