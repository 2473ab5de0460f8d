use std::time::Duration;

use thiserror::Error;

use crate::llm_client::LlmError;

/// The only failure that ends a run: without document text, no later stage
/// has anything to work with.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download returned status {status} for {source_url}")]
    Status { status: u16, source_url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("No text could be extracted from {0}")]
    NoText(String),
}

/// A non-fatal stage failure. The orchestrator logs it and substitutes the
/// stage's default output.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("{stage} timed out after {}s", .elapsed.as_secs())]
    Timeout {
        stage: &'static str,
        elapsed: Duration,
    },

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Question lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Nothing to process: {0}")]
    Empty(&'static str),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unexpected question payload: {0}")]
    Payload(String),
}
