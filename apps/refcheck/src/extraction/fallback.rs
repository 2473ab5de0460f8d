//! Deterministic Fallback Extractor: regex safety net for identity fields.
//!
//! Only fills gaps: the merge step never lets these values override a real
//! value from the AI extractor.
//!
//! Known limitation: the name heuristic expects a capitalized two-to-three
//! word name on its own line near the top of the resume. Non-Latin scripts,
//! all-caps headers, and contact blocks placed after a summary paragraph are
//! missed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::patterns::{email_regex, leading_name_regex, phone_regex};

/// How far into the resume the name heuristic looks.
pub const NAME_SCAN_CHARS: usize = 500;
/// How far into the resume email and phone patterns look.
pub const CONTACT_SCAN_CHARS: usize = 3000;

/// Regex-extracted identity fields. Empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

pub fn extract_fallback(text: &str) -> FallbackFields {
    let name_window = leading_chars(text, NAME_SCAN_CHARS);
    let contact_window = leading_chars(text, CONTACT_SCAN_CHARS);

    let name = leading_name_regex()
        .and_then(|re| re.captures(name_window))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let email = email_regex()
        .and_then(|re| re.find(contact_window))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let phone = phone_regex()
        .and_then(|re| re.find(contact_window))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    let fields = FallbackFields { name, email, phone };
    debug!("Fallback extracted: {:?}", fields);
    fields
}

/// The longest prefix of `text` holding at most `max_chars` characters.
pub(crate) fn leading_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
