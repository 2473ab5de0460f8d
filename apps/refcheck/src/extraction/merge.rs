use serde::{Deserialize, Serialize};

use crate::extraction::fallback::FallbackFields;
use crate::models::applicant::{is_placeholder, ApplicantInfo};
use crate::models::reference::ExtractedReference;

/// Final identity fields after combining AI and fallback extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedExtraction {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub references: Vec<ExtractedReference>,
    pub resume_source: String,
}

impl MergedExtraction {
    /// True when at least one identity field or reference carries real data.
    pub fn has_meaningful_data(&self) -> bool {
        !is_placeholder(&self.name)
            || !is_placeholder(&self.email)
            || !is_placeholder(&self.phone)
            || !self.references.is_empty()
    }
}

/// AI value wins when it is real; otherwise the fallback value; otherwise "".
pub fn merge_field(ai: &str, fallback: &str) -> String {
    if !is_placeholder(ai) {
        ai.trim().to_string()
    } else if !fallback.trim().is_empty() {
        fallback.trim().to_string()
    } else {
        String::new()
    }
}

/// Combines both extractors. References come from the AI extractor only.
pub fn merge_extractions(
    applicant: &ApplicantInfo,
    references: &[ExtractedReference],
    fallback: &FallbackFields,
    resume_source: &str,
) -> MergedExtraction {
    MergedExtraction {
        name: merge_field(&applicant.full_name, &fallback.name),
        email: merge_field(&applicant.email, &fallback.email),
        phone: merge_field(&applicant.phone, &fallback.phone),
        references: references.to_vec(),
        resume_source: resume_source.to_string(),
    }
}
