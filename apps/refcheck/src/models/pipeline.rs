use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::applicant::ApplicantInfo;
use crate::models::reference::ExtractedReference;

/// Where a run currently stands. Variants are declared in pipeline order, so
/// `Ord` reflects progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Initialized,
    Downloaded,
    Parsed,
    ApplicantExtracted,
    ReferencesExtracted,
    VectorstoreBuilt,
    QuestionsFetched,
    Completed,
    Error,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Initialized => "initialized",
            PipelineStatus::Downloaded => "downloaded",
            PipelineStatus::Parsed => "parsed",
            PipelineStatus::ApplicantExtracted => "applicant_extracted",
            PipelineStatus::ReferencesExtracted => "references_extracted",
            PipelineStatus::VectorstoreBuilt => "vectorstore_built",
            PipelineStatus::QuestionsFetched => "questions_fetched",
            PipelineStatus::Completed => "completed",
            PipelineStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStatus::Completed | PipelineStatus::Error)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable record threaded through one pipeline run. Never shared between runs.
#[derive(Debug, Clone)]
pub struct ExtractionState {
    pub resume_source: String,
    pub role: String,
    pub organization: String,
    pub resume_text: String,
    pub chunks: Vec<String>,
    pub applicant_info: ApplicantInfo,
    pub references: Vec<ExtractedReference>,
    pub questions: Vec<String>,
    pub vectorstore_path: String,
    pub status: PipelineStatus,
    pub error_message: String,
}

impl ExtractionState {
    pub fn new(resume_source: &str, role: &str, organization: &str) -> Self {
        Self {
            resume_source: resume_source.to_string(),
            role: role.to_string(),
            organization: organization.to_string(),
            resume_text: String::new(),
            chunks: vec![],
            applicant_info: ApplicantInfo::unknown(),
            references: vec![],
            questions: vec![],
            vectorstore_path: String::new(),
            status: PipelineStatus::Initialized,
            error_message: String::new(),
        }
    }

    /// Moves the run forward. Backward moves, moves out of a terminal state,
    /// and moves into `Error` are refused; use [`ExtractionState::fail`] for
    /// the latter.
    pub fn advance(&mut self, next: PipelineStatus) -> bool {
        if self.status.is_terminal() || next == PipelineStatus::Error || next <= self.status {
            warn!("Refusing status transition {} -> {}", self.status, next);
            return false;
        }
        self.status = next;
        true
    }

    /// Aborts the run. Only legal before any stage has succeeded.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.status != PipelineStatus::Initialized {
            warn!("Refusing to fail run already at {}", self.status);
            return false;
        }
        self.status = PipelineStatus::Error;
        self.error_message = message.into();
        true
    }

    pub fn into_result(self) -> PipelineResult {
        PipelineResult {
            applicant_info: self.applicant_info,
            references: self.references,
            questions: self.questions,
            vectorstore_path: self.vectorstore_path,
            status: self.status,
            error_message: self.error_message,
        }
    }
}

/// What every call to `Pipeline::run` returns, whatever happened along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub applicant_info: ApplicantInfo,
    pub references: Vec<ExtractedReference>,
    pub questions: Vec<String>,
    pub vectorstore_path: String,
    pub status: PipelineStatus,
    pub error_message: String,
}
