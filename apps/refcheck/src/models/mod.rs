pub mod applicant;
pub mod pipeline;
pub mod reference;

pub use applicant::{ApplicantInfo, UNKNOWN};
pub use pipeline::{ExtractionState, PipelineResult, PipelineStatus};
pub use reference::{
    ExtractedReference, ReferenceCandidate, ReferenceRecord, ValidationReport, ValidationSummary,
    UNKNOWN_REFERENCE,
};
