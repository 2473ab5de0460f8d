//! Offline collaborators for pipeline tests.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::document::{DocumentFetcher, DocumentTextExtractor, ResumeDocument};
use crate::errors::{AcquisitionError, LookupError};
use crate::llm_client::{LanguageModel, LlmError};
use crate::pipeline::{Pipeline, PipelineSettings};
use crate::questions::QuestionLookup;

pub(crate) enum StaticFetcher {
    Text(&'static str),
    Missing,
    Stalled,
}

impl StaticFetcher {
    pub(crate) fn text(text: &'static str) -> Self {
        StaticFetcher::Text(text)
    }

    pub(crate) fn missing() -> Self {
        StaticFetcher::Missing
    }

    pub(crate) fn stalled() -> Self {
        StaticFetcher::Stalled
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, source: &str) -> Result<ResumeDocument, AcquisitionError> {
        match self {
            StaticFetcher::Text(text) => Ok(ResumeDocument {
                bytes: Bytes::from_static(text.as_bytes()),
                filename: "resume.txt".to_string(),
            }),
            StaticFetcher::Missing => Err(AcquisitionError::Status {
                status: 404,
                source_url: source.to_string(),
            }),
            StaticFetcher::Stalled => std::future::pending().await,
        }
    }
}

pub(crate) enum ScriptedModel {
    WellBehaved,
    Failing,
    Stalled,
}

impl ScriptedModel {
    pub(crate) fn well_behaved() -> Self {
        ScriptedModel::WellBehaved
    }

    pub(crate) fn failing() -> Self {
        ScriptedModel::Failing
    }

    pub(crate) fn stalled() -> Self {
        ScriptedModel::Stalled
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, system: &str, _prompt: &str) -> Result<String, LlmError> {
        match self {
            ScriptedModel::WellBehaved if system.contains("referees") => Ok(
                r#"[{"name": "Bob Lee", "email": "bob@acme.com", "company": "Acme Corp"}]"#.to_string(),
            ),
            ScriptedModel::WellBehaved => Ok(
                r#"{"full_name": "Jane Doe", "email": "jane@acme.com", "phone": null, "key_skills": ["Triage"]}"#
                    .to_string(),
            ),
            ScriptedModel::Failing => Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            ScriptedModel::Stalled => std::future::pending().await,
        }
    }
}

pub(crate) struct FailingLookup;

#[async_trait]
impl QuestionLookup for FailingLookup {
    async fn questions(&self, _role: &str, _organization: &str) -> Result<Vec<String>, LookupError> {
        Err(LookupError::Payload("connection reset".to_string()))
    }
}

pub(crate) fn pipeline(
    fetcher: impl DocumentFetcher + 'static,
    model: impl LanguageModel + 'static,
    lookup: impl QuestionLookup + 'static,
    vectorstore_root: &Path,
) -> Pipeline {
    Pipeline::new(
        Arc::new(fetcher),
        Arc::new(DocumentTextExtractor),
        Arc::new(model),
        Arc::new(lookup),
        PipelineSettings {
            vectorstore_root: vectorstore_root.to_path_buf(),
            ..PipelineSettings::default()
        },
    )
}
