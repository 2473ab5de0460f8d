//! AI Structured Extractor: one model call per entity type.
//!
//! The `try_*` methods report failures so the orchestrator can apply its
//! containment policy; the plain methods swallow them and return the
//! documented defaults.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::StageError;
use crate::extraction::prompts::{
    ANY_ROLE, APPLICANT_PROMPT, APPLICANT_SYSTEM, REFERENCES_PROMPT, REFERENCES_SYSTEM,
};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::{json_span, LanguageModel};
use crate::models::applicant::ApplicantInfo;
use crate::models::reference::ExtractedReference;

/// Default number of resume characters sent to the model.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 3000;

/// Phrases a model uses when it answers in prose that there is nothing to
/// return instead of sending `[]`.
const NO_REFERENCE_PHRASES: &[&str] = &[
    "no references",
    "no reference",
    "none found",
    "not found",
    "not provided",
];

#[derive(Clone)]
pub struct AiExtractor {
    llm: Arc<dyn LanguageModel>,
    max_prompt_chars: usize,
}

impl AiExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>, max_prompt_chars: usize) -> Self {
        Self {
            llm,
            max_prompt_chars,
        }
    }

    pub async fn try_extract_applicant(&self, resume_text: &str) -> Result<ApplicantInfo, StageError> {
        let prompt = format!(
            "{}\n\n{}",
            APPLICANT_PROMPT.replace(
                "{resume_text}",
                &truncate_for_prompt(resume_text, self.max_prompt_chars)
            ),
            NO_INVENTION_INSTRUCTION
        );
        let system = format!("{APPLICANT_SYSTEM} {JSON_ONLY_SYSTEM}");

        let raw = self.llm.complete(&system, &prompt).await?;
        let info = parse_applicant_output(&raw)?;
        info!("Applicant info extracted: {}", info.full_name);
        Ok(info)
    }

    /// Never fails: any error yields [`ApplicantInfo::unknown`].
    pub async fn extract_applicant(&self, resume_text: &str) -> ApplicantInfo {
        self.try_extract_applicant(resume_text)
            .await
            .unwrap_or_else(|e| {
                warn!("Applicant extraction failed: {e}");
                ApplicantInfo::unknown()
            })
    }

    pub async fn try_extract_references(
        &self,
        resume_text: &str,
        role: Option<&str>,
    ) -> Result<Vec<ExtractedReference>, StageError> {
        let role = role.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(ANY_ROLE);
        let prompt = format!(
            "{}\n\n{}",
            REFERENCES_PROMPT
                .replace("{role}", role)
                .replace(
                    "{resume_text}",
                    &truncate_for_prompt(resume_text, self.max_prompt_chars)
                ),
            NO_INVENTION_INSTRUCTION
        );
        let system = format!("{REFERENCES_SYSTEM} {JSON_ONLY_SYSTEM}");

        let raw = self.llm.complete(&system, &prompt).await?;
        let references = parse_references_output(&raw)?;
        info!("References extracted: {} found", references.len());
        Ok(references)
    }

    /// Never fails: any error yields an empty list.
    pub async fn extract_references(
        &self,
        resume_text: &str,
        role: Option<&str>,
    ) -> Vec<ExtractedReference> {
        self.try_extract_references(resume_text, role)
            .await
            .unwrap_or_else(|e| {
                warn!("Reference extraction failed: {e}");
                vec![]
            })
    }
}

/// Keeps the first `max_chars` characters, marking the cut with `...`.
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn parse_applicant_output(raw: &str) -> Result<ApplicantInfo, StageError> {
    let span = json_span(raw, '{', '}')
        .ok_or_else(|| StageError::MalformedOutput("no JSON object in applicant response".into()))?;
    let value: Value = serde_json::from_str(span)
        .map_err(|e| StageError::MalformedOutput(format!("applicant JSON: {e}")))?;
    if !value.is_object() {
        return Err(StageError::MalformedOutput("applicant response is not an object".into()));
    }
    Ok(ApplicantInfo::from_json(&value))
}

pub fn parse_references_output(raw: &str) -> Result<Vec<ExtractedReference>, StageError> {
    let Some(span) = json_span(raw, '[', ']') else {
        let lower = raw.to_lowercase();
        if NO_REFERENCE_PHRASES.iter().any(|p| lower.contains(p)) {
            debug!("Model stated that the resume lists no references");
            return Ok(vec![]);
        }
        return Err(StageError::MalformedOutput(
            "no JSON array in references response".into(),
        ));
    };

    let value: Value = serde_json::from_str(span)
        .map_err(|e| StageError::MalformedOutput(format!("references JSON: {e}")))?;
    let items = value
        .as_array()
        .ok_or_else(|| StageError::MalformedOutput("references response is not an array".into()))?;

    let references = items
        .iter()
        .filter_map(|item| {
            let parsed = ExtractedReference::from_json(item);
            if parsed.is_none() {
                debug!("Dropping reference candidate without a name: {item}");
            }
            parsed
        })
        .collect();
    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::models::applicant::UNKNOWN;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned reply and records the prompts it was given.
    struct ScriptedModel {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(vec![]),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_truncate_for_prompt() {
        assert_eq!(truncate_for_prompt("abcdef", 3), "abc...");
        assert_eq!(truncate_for_prompt("abc", 3), "abc");
        assert_eq!(truncate_for_prompt("ééé", 1), "é...");
    }

    #[test]
    fn test_parse_applicant_with_surrounding_prose() {
        let raw = "Sure! Here it is:\n```json\n{\"full_name\": \"Jane Doe\", \"email\": \"jane@acme.com\"}\n```";
        let info = parse_applicant_output(raw).unwrap();
        assert_eq!(info.full_name, "Jane Doe");
        assert_eq!(info.phone, UNKNOWN);
    }

    #[test]
    fn test_parse_applicant_without_json_fails() {
        assert!(parse_applicant_output("I could not read the resume.").is_err());
        assert!(parse_applicant_output("{not json}").is_err());
    }

    #[test]
    fn test_parse_references_drops_nameless_entries() {
        let raw = r#"[
            {"name": "Bob Lee", "email": "bob@acme.com", "company": "Acme"},
            {"name": "", "email": "ghost@acme.com"},
            {"email": "nobody@acme.com"}
        ]"#;
        let refs = parse_references_output(raw).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "Bob Lee");
        assert_eq!(refs[0].relationship, "Professional contact");
    }

    #[test]
    fn test_parse_references_empty_array() {
        assert!(parse_references_output("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_references_prose_denial_is_empty() {
        let refs = parse_references_output("There are no references listed in this resume.").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_parse_references_garbage_fails() {
        assert!(parse_references_output("Here you go: {\"name\": \"A\"}").is_err());
    }

    #[tokio::test]
    async fn test_extract_applicant_defaults_on_llm_error() {
        let extractor = AiExtractor::new(Arc::new(ScriptedModel::failing(500)), 100);
        assert_eq!(extractor.extract_applicant("Jane Doe").await, ApplicantInfo::unknown());
        assert!(extractor.try_extract_applicant("Jane Doe").await.is_err());
    }

    #[tokio::test]
    async fn test_extract_references_defaults_on_bad_output() {
        let extractor = AiExtractor::new(Arc::new(ScriptedModel::replying("???")), 100);
        assert!(extractor.extract_references("text", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_is_truncated_and_carries_role() {
        let model = Arc::new(ScriptedModel::replying("[]"));
        let extractor = AiExtractor::new(model.clone(), 10);
        let text = "0123456789ABCDEFGHIJ";
        extractor
            .try_extract_references(text, Some("Registered Nurse"))
            .await
            .unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("for a Registered Nurse position"));
        assert!(prompts[0].contains("0123456789..."));
        assert!(!prompts[0].contains("ABCDEFGHIJ"));
    }

    #[tokio::test]
    async fn test_blank_role_uses_placeholder() {
        let model = Arc::new(ScriptedModel::replying("[]"));
        let extractor = AiExtractor::new(model.clone(), 100);
        extractor.try_extract_references("text", Some("  ")).await.unwrap();
        assert!(model.prompts.lock().unwrap()[0].contains("for a professional position"));
    }
}
