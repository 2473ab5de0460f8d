//! Reference-check questions per role and organization.
//!
//! A lookup that finds nothing is not an error; callers fall back to
//! [`generic_questions`] for the role's category.

pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::errors::LookupError;

pub use postgres::PgQuestionLookup;

#[async_trait]
pub trait QuestionLookup: Send + Sync {
    /// Questions configured for `role` at `organization`; empty when none are.
    async fn questions(&self, role: &str, organization: &str) -> Result<Vec<String>, LookupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    Software,
    Marketing,
    Management,
    Default,
}

const SOFTWARE_TERMS: &[&str] = &["software", "developer", "engineer", "programmer"];
const MARKETING_TERMS: &[&str] = &["marketing", "brand", "campaign", "digital"];
const MANAGEMENT_TERMS: &[&str] = &["manager", "director", "lead", "supervisor"];

const SOFTWARE_QUESTIONS: &[&str] = &[
    "How would you rate the candidate's technical skills and problem-solving abilities?",
    "Can you describe a challenging project they worked on and how they approached it?",
    "How did they collaborate with team members and handle code reviews?",
    "What are their strongest programming languages and technical competencies?",
    "Would you recommend them for a senior software development position?",
];

const MARKETING_QUESTIONS: &[&str] = &[
    "How would you evaluate their campaign management and strategic thinking?",
    "Can you provide examples of successful marketing initiatives they led?",
    "How did they handle budget management and performance metrics?",
    "What are their strengths in team leadership and client relations?",
    "Would you hire them again for a marketing leadership role?",
];

const MANAGEMENT_QUESTIONS: &[&str] = &[
    "How would you assess their leadership and team management skills?",
    "Can you describe how they handled difficult situations or conflicts?",
    "How did they contribute to achieving team and organizational goals?",
    "What are their strengths in communication and decision-making?",
    "Would you recommend them for a senior management position?",
];

const DEFAULT_QUESTIONS: &[&str] = &[
    "How would you describe the candidate's work performance and professionalism?",
    "What are their key strengths and areas of expertise?",
    "How did they handle challenges and work under pressure?",
    "Can you provide examples of their contributions to team success?",
    "Would you recommend them for a position in their field of expertise?",
];

impl RoleCategory {
    /// Substring match on the lowercased role; first category wins.
    pub fn from_role(role: &str) -> Self {
        let role = role.to_lowercase();
        let mentions = |terms: &[&str]| terms.iter().any(|t| role.contains(t));
        if mentions(SOFTWARE_TERMS) {
            RoleCategory::Software
        } else if mentions(MARKETING_TERMS) {
            RoleCategory::Marketing
        } else if mentions(MANAGEMENT_TERMS) {
            RoleCategory::Management
        } else {
            RoleCategory::Default
        }
    }

    pub fn questions(&self) -> &'static [&'static str] {
        match self {
            RoleCategory::Software => SOFTWARE_QUESTIONS,
            RoleCategory::Marketing => MARKETING_QUESTIONS,
            RoleCategory::Management => MANAGEMENT_QUESTIONS,
            RoleCategory::Default => DEFAULT_QUESTIONS,
        }
    }
}

pub fn generic_questions(role: &str) -> Vec<String> {
    let category = RoleCategory::from_role(role);
    debug!("Using generic {:?} questions for role '{}'", category, role);
    category.questions().iter().map(|q| q.to_string()).collect()
}

/// Decodes a stored question set: a JSON array of strings, or a JSON string
/// that itself holds such an array.
pub fn decode_questions(raw: &str) -> Result<Vec<String>, LookupError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| LookupError::Payload(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(non_blank(items.into_iter().filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        }))),
        Value::String(inner) => serde_json::from_str::<Vec<String>>(&inner)
            .map(non_blank)
            .map_err(|e| LookupError::Payload(format!("encoded question list: {e}"))),
        other => Err(LookupError::Payload(format!("expected a list, got {other}"))),
    }
}

fn non_blank(questions: impl IntoIterator<Item = String>) -> Vec<String> {
    questions
        .into_iter()
        .filter(|q| !q.trim().is_empty())
        .collect()
}

/// In-memory question table, keyed by exact role and organization. An empty
/// table stands in for "no database configured".
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionLookup {
    table: HashMap<(String, String), Vec<String>>,
}

impl StaticQuestionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions<I, Q>(mut self, role: &str, organization: &str, questions: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        self.table.insert(
            (role.to_string(), organization.to_string()),
            questions.into_iter().map(Into::into).collect(),
        );
        self
    }
}

#[async_trait]
impl QuestionLookup for StaticQuestionLookup {
    async fn questions(&self, role: &str, organization: &str) -> Result<Vec<String>, LookupError> {
        Ok(self
            .table
            .get(&(role.to_string(), organization.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
