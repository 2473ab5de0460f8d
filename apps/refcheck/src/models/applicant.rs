use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder for any applicant field the extractors could not fill.
pub const UNKNOWN: &str = "Unknown";

/// Facts about the applicant pulled from the resume.
///
/// Every scalar field holds either a real value or [`UNKNOWN`]; nothing is
/// ever null, so downstream string handling never has to branch on absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub current_position: String,
    pub experience_years: String,
    pub key_skills: Vec<String>,
}

impl Default for ApplicantInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

impl ApplicantInfo {
    pub fn unknown() -> Self {
        Self {
            full_name: UNKNOWN.to_string(),
            email: UNKNOWN.to_string(),
            phone: UNKNOWN.to_string(),
            current_position: UNKNOWN.to_string(),
            experience_years: UNKNOWN.to_string(),
            key_skills: vec![],
        }
    }

    /// Builds an `ApplicantInfo` from a loosely-shaped JSON object.
    ///
    /// Strings are trimmed, numbers and booleans are rendered as text, and
    /// anything null, blank, or missing collapses to [`UNKNOWN`]. Non-string
    /// entries in `key_skills` are skipped.
    pub fn from_json(value: &Value) -> Self {
        let key_skills = value
            .get("key_skills")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|s| s.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            full_name: text_or_unknown(value.get("full_name")),
            email: text_or_unknown(value.get("email")),
            phone: text_or_unknown(value.get("phone")),
            current_position: text_or_unknown(value.get("current_position")),
            experience_years: text_or_unknown(value.get("experience_years")),
            key_skills,
        }
    }

    /// True when no field carries a real value.
    pub fn is_unknown(&self) -> bool {
        [
            &self.full_name,
            &self.email,
            &self.phone,
            &self.current_position,
            &self.experience_years,
        ]
        .iter()
        .all(|f| is_placeholder(f))
            && self.key_skills.is_empty()
    }
}

/// True for blank strings and the [`UNKNOWN`] sentinel.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == UNKNOWN
}

/// Text of a JSON scalar, trimmed. Numbers and booleans are rendered;
/// null, arrays and objects give `None`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_or_unknown(value: Option<&Value>) -> String {
    let text = value.and_then(scalar_text).unwrap_or_default();
    if text.is_empty() {
        UNKNOWN.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_fills_missing_fields_with_unknown() {
        let info = ApplicantInfo::from_json(&json!({ "full_name": "Jane Doe" }));
        assert_eq!(info.full_name, "Jane Doe");
        assert_eq!(info.email, UNKNOWN);
        assert_eq!(info.current_position, UNKNOWN);
        assert!(info.key_skills.is_empty());
    }

    #[test]
    fn test_from_json_null_and_blank_become_unknown() {
        let info = ApplicantInfo::from_json(&json!({
            "full_name": null,
            "email": "   ",
            "phone": "555-123-4567"
        }));
        assert_eq!(info.full_name, UNKNOWN);
        assert_eq!(info.email, UNKNOWN);
        assert_eq!(info.phone, "555-123-4567");
    }

    #[test]
    fn test_from_json_renders_numeric_experience() {
        let info = ApplicantInfo::from_json(&json!({ "experience_years": 7 }));
        assert_eq!(info.experience_years, "7");
    }

    #[test]
    fn test_from_json_skips_non_string_skills() {
        let info = ApplicantInfo::from_json(&json!({ "key_skills": ["Rust", 3, null, " SQL "] }));
        assert_eq!(info.key_skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_unknown_is_unknown() {
        assert!(ApplicantInfo::unknown().is_unknown());
        let mut info = ApplicantInfo::unknown();
        info.email = "a@b.co".to_string();
        assert!(!info.is_unknown());
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder(" Unknown "));
        assert!(!is_placeholder("Jane"));
    }
}
