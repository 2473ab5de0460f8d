use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extraction::fallback::{extract_fallback, FallbackFields};
use crate::extraction::merge::{merge_extractions, MergedExtraction};
use crate::models::pipeline::PipelineResult;
use crate::pipeline::Pipeline;

/// `Extracted` once anything usable was found; `Processing` means the
/// resume still needs a manual pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Extracted,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResume {
    pub pipeline: PipelineResult,
    pub fallback: FallbackFields,
    pub merged: MergedExtraction,
    pub outcome: ProcessingOutcome,
    /// Whether the model contributed anything to the result.
    pub ai_used: bool,
}

impl Pipeline {
    /// Runs the pipeline, then backs the model's identity fields with the
    /// regex fallback over the same resume text.
    pub async fn process(
        &self,
        resume_source: &str,
        role: &str,
        organization: &str,
    ) -> ProcessedResume {
        let state = self.run_state(resume_source, role, organization).await;
        let fallback = extract_fallback(&state.resume_text);
        let result = state.into_result();

        let merged = merge_extractions(
            &result.applicant_info,
            &result.references,
            &fallback,
            resume_source,
        );
        let ai_used = !result.applicant_info.is_unknown() || !result.references.is_empty();
        let outcome = if merged.has_meaningful_data() {
            ProcessingOutcome::Extracted
        } else {
            ProcessingOutcome::Processing
        };
        info!(
            "Processed {resume_source}: outcome={:?}, ai_used={ai_used}, {} references",
            outcome,
            merged.references.len()
        );

        ProcessedResume {
            pipeline: result,
            fallback,
            merged,
            outcome,
            ai_used,
        }
    }
}
