//! Pipeline Orchestrator: drives one resume through every stage.
//!
//! Flow: download → parse → extract_applicant → extract_references →
//!       build_vectorstore → fetch_questions → completed.
//!
//! Only the download stage can end a run. Every later stage returns a
//! `Result`; a failure is logged and replaced by the stage default so the
//! caller still gets whatever the other stages found.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::document::{DocumentFetcher, TextExtractor};
use crate::errors::{AcquisitionError, StageError};
use crate::extraction::ai::AiExtractor;
use crate::llm_client::LanguageModel;
use crate::models::applicant::ApplicantInfo;
use crate::models::pipeline::{ExtractionState, PipelineResult, PipelineStatus};
use crate::models::reference::ExtractedReference;
use crate::pipeline::chunker::RecursiveChunker;
use crate::pipeline::vectorstore::build_vectorstore;
use crate::pipeline::PipelineSettings;
use crate::questions::{generic_questions, QuestionLookup};

/// Holds the collaborators for any number of runs. Each run gets its own
/// [`ExtractionState`]; nothing mutable is shared between runs.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn DocumentFetcher>,
    text_extractor: Arc<dyn TextExtractor>,
    ai: AiExtractor,
    questions: Arc<dyn QuestionLookup>,
    chunker: RecursiveChunker,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        text_extractor: Arc<dyn TextExtractor>,
        llm: Arc<dyn LanguageModel>,
        questions: Arc<dyn QuestionLookup>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            fetcher,
            text_extractor,
            ai: AiExtractor::new(llm, settings.max_prompt_chars),
            questions,
            chunker: RecursiveChunker::default(),
            settings,
        }
    }

    /// Runs every stage for one resume. Never fails: a fatal download
    /// problem is reported through `status` and `error_message`.
    pub async fn run(&self, resume_source: &str, role: &str, organization: &str) -> PipelineResult {
        self.run_state(resume_source, role, organization)
            .await
            .into_result()
    }

    pub(crate) async fn run_state(
        &self,
        resume_source: &str,
        role: &str,
        organization: &str,
    ) -> ExtractionState {
        info!("Pipeline started for {role} at {organization}");
        let mut state = ExtractionState::new(resume_source, role, organization);

        // Step 1: Download and extract text (fatal on failure)
        match self.download(resume_source).await {
            Ok(text) => {
                info!("Resume downloaded and parsed, text length: {}", text.len());
                state.resume_text = text;
                state.advance(PipelineStatus::Downloaded);
            }
            Err(e) => {
                let message = format!("Failed to download resume: {e}");
                error!("{message}");
                state.fail(message);
                return state;
            }
        }

        // Step 2: Chunk
        state.chunks = contain("parse", self.parse(&state.resume_text), Vec::new);
        info!("Resume parsed into {} chunks", state.chunks.len());
        state.advance(PipelineStatus::Parsed);

        // Step 3: Applicant
        state.applicant_info = contain(
            "extract_applicant",
            self.extract_applicant(&state.resume_text).await,
            ApplicantInfo::unknown,
        );
        state.advance(PipelineStatus::ApplicantExtracted);

        // Step 4: References
        state.references = contain(
            "extract_references",
            self.extract_references(&state.resume_text, role).await,
            Vec::new,
        );
        state.advance(PipelineStatus::ReferencesExtracted);

        // Step 5: Vectorstore directory
        state.vectorstore_path = contain(
            "build_vectorstore",
            build_vectorstore(&self.settings.vectorstore_root, role, organization, &state.chunks)
                .await
                .map(|path| path.display().to_string()),
            String::new,
        );
        state.advance(PipelineStatus::VectorstoreBuilt);

        // Step 6: Questions
        state.questions = contain(
            "fetch_questions",
            self.fetch_questions(role, organization).await,
            || generic_questions(role),
        );
        info!("Questions fetched: {} questions", state.questions.len());
        state.advance(PipelineStatus::QuestionsFetched);

        state.advance(PipelineStatus::Completed);
        info!(
            "Pipeline completed: {} references, {} questions",
            state.references.len(),
            state.questions.len()
        );
        state
    }

    async fn download(&self, source: &str) -> Result<String, AcquisitionError> {
        let limit = self.settings.fetch_timeout;
        let document = timeout(limit, self.fetcher.fetch(source))
            .await
            .map_err(|_| AcquisitionError::Timeout(limit))??;

        let filename = document.filename.clone();
        let extractor = Arc::clone(&self.text_extractor);
        // Parsers are CPU-bound; a panic in one surfaces as empty text.
        let text = tokio::task::spawn_blocking(move || {
            extractor.extract(&document.bytes, &document.filename)
        })
        .await
        .unwrap_or_else(|e| {
            warn!("Text extraction aborted for {filename}: {e}");
            String::new()
        });

        if text.trim().is_empty() {
            return Err(AcquisitionError::NoText(filename));
        }
        Ok(text)
    }

    fn parse(&self, text: &str) -> Result<Vec<String>, StageError> {
        if text.trim().is_empty() {
            return Err(StageError::Empty("resume text"));
        }
        Ok(self.chunker.split(text))
    }

    async fn extract_applicant(&self, text: &str) -> Result<ApplicantInfo, StageError> {
        bounded(
            "extract_applicant",
            self.settings.llm_timeout,
            self.ai.try_extract_applicant(text),
        )
        .await
    }

    async fn extract_references(
        &self,
        text: &str,
        role: &str,
    ) -> Result<Vec<ExtractedReference>, StageError> {
        bounded(
            "extract_references",
            self.settings.llm_timeout,
            self.ai.try_extract_references(text, Some(role)),
        )
        .await
    }

    /// Stored questions for the role, or the generic set when none are stored.
    async fn fetch_questions(&self, role: &str, organization: &str) -> Result<Vec<String>, StageError> {
        let stored = bounded(
            "fetch_questions",
            self.settings.lookup_timeout,
            async { self.questions.questions(role, organization).await.map_err(StageError::from) },
        )
        .await?;

        if stored.is_empty() {
            info!("No stored questions for {role} at {organization}; using generic set");
            return Ok(generic_questions(role));
        }
        Ok(stored)
    }
}

/// Awaits `fut`, turning an elapsed `limit` into [`StageError::Timeout`].
async fn bounded<T, F>(stage: &'static str, limit: Duration, fut: F) -> Result<T, StageError>
where
    F: Future<Output = Result<T, StageError>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(StageError::Timeout {
            stage,
            elapsed: limit,
        }),
    }
}

/// Containment for non-fatal stages: log and substitute the default.
fn contain<T>(stage: &str, result: Result<T, StageError>, default: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        warn!("{stage} failed, continuing with default: {e}");
        default()
    })
}
