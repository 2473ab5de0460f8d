//! Resume reference extraction: turns a resume document into applicant
//! identity, structured references and reference-check questions.

pub mod config;
pub mod document;
pub mod errors;
pub mod extraction;
pub mod llm_client;
pub mod models;
pub mod pipeline;
pub mod questions;
pub mod references;

pub use pipeline::{Pipeline, PipelineSettings, ProcessedResume};
pub use references::validate;
