use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::applicant::scalar_text;

/// Name given to a reference whose name could not be recovered.
pub const UNKNOWN_REFERENCE: &str = "Unknown Reference";

/// Relationship assumed when the model names a referee without saying how
/// they know the applicant.
pub const DEFAULT_RELATIONSHIP: &str = "Professional contact";

/// A reference as returned by the AI extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedReference {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub company: String,
    pub relationship: String,
    pub years_worked: String,
    pub context: String,
}

impl ExtractedReference {
    /// Builds a reference from one element of the model's JSON array.
    /// Returns `None` when the element is not an object or has no usable name.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |keys: &[&str]| -> String {
            keys.iter()
                .find_map(|k| obj.get(*k).and_then(scalar_text))
                .unwrap_or_default()
        };

        let name = field(&["name"]);
        if name.is_empty() {
            return None;
        }

        let relationship = field(&["relationship"]);
        Some(Self {
            name,
            email: field(&["email"]),
            phone_number: field(&["phone_number", "phone"]),
            company: field(&["company"]),
            relationship: if relationship.is_empty() {
                DEFAULT_RELATIONSHIP.to_string()
            } else {
                relationship
            },
            years_worked: field(&["years_worked"]),
            context: field(&["context"]),
        })
    }

    pub fn to_record(&self) -> ReferenceRecord {
        ReferenceRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            company: self.company.clone(),
            relationship: self.relationship.clone(),
        }
    }
}

/// An unvalidated reference, either already structured by the model or a raw
/// line of text that still has to go through the reference parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReferenceCandidate {
    Structured(ExtractedReference),
    FreeText(String),
}

/// A normalized reference ready to be persisted or contacted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub company: String,
    pub relationship: String,
}

impl ReferenceRecord {
    /// A record carrying only a name; every other field is empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_valid_name(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && name != UNKNOWN_REFERENCE
    }

    pub fn has_contact(&self) -> bool {
        !self.email.is_empty() || !self.phone_number.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_references: usize,
    pub with_email: usize,
    pub with_phone: usize,
    pub missing_info: usize,
}

impl ValidationSummary {
    pub fn from_records(records: &[ReferenceRecord]) -> Self {
        let with_contact = records.iter().filter(|r| r.has_contact()).count();
        Self {
            total_references: records.len(),
            with_email: records.iter().filter(|r| !r.email.is_empty()).count(),
            with_phone: records.iter().filter(|r| !r.phone_number.is_empty()).count(),
            missing_info: records.len() - with_contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub validated_references: Vec<ReferenceRecord>,
    pub validation_summary: ValidationSummary,
}

impl ValidationReport {
    pub fn from_records(validated_references: Vec<ReferenceRecord>) -> Self {
        let validation_summary = ValidationSummary::from_records(&validated_references);
        Self {
            validated_references,
            validation_summary,
        }
    }
}
