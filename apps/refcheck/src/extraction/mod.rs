//! Identity and reference extraction from resume text.

pub mod ai;
pub mod fallback;
pub mod merge;
pub mod patterns;
pub mod prompts;

pub use ai::AiExtractor;
pub use fallback::{extract_fallback, FallbackFields};
pub use merge::{merge_extractions, MergedExtraction};
