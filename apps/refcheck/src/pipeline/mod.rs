//! Pipeline Orchestrator and the stages only it uses.

pub mod chunker;
pub mod orchestrator;
pub mod processing;
pub mod vectorstore;

#[cfg(test)]
pub(crate) mod fakes;

use std::path::PathBuf;
use std::time::Duration;

use crate::extraction::ai::DEFAULT_MAX_PROMPT_CHARS;

pub use orchestrator::Pipeline;
pub use processing::{ProcessedResume, ProcessingOutcome};

/// Bounds and locations for a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub lookup_timeout: Duration,
    pub max_prompt_chars: usize,
    pub vectorstore_root: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            llm_timeout: Duration::from_secs(90),
            lookup_timeout: Duration::from_secs(10),
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            vectorstore_root: PathBuf::from("./vectorstore"),
        }
    }
}
