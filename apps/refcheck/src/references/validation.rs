use tracing::{debug, info};

use crate::models::reference::{ReferenceCandidate, ReferenceRecord, ValidationReport};
use crate::references::parser::parse_reference;

/// Parses every non-blank line and keeps the records with a usable name.
/// Never fails; empty input gives an all-zero summary.
pub fn validate<S: AsRef<str>>(lines: &[S]) -> ValidationReport {
    let records = lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .map(parse_reference)
        .collect();
    finish(records)
}

/// Validates a mix of model-structured references and raw lines. Structured
/// candidates skip the parser but face the same name rule.
pub fn validate_candidates(candidates: Vec<ReferenceCandidate>) -> ValidationReport {
    let records = candidates
        .into_iter()
        .filter_map(|candidate| match candidate {
            ReferenceCandidate::Structured(reference) => Some(reference.to_record()),
            ReferenceCandidate::FreeText(line) if line.trim().is_empty() => None,
            ReferenceCandidate::FreeText(line) => Some(parse_reference(&line)),
        })
        .collect();
    finish(records)
}

fn finish(records: Vec<ReferenceRecord>) -> ValidationReport {
    let parsed = records.len();
    let kept: Vec<ReferenceRecord> = records
        .into_iter()
        .filter(|r| {
            let keep = r.has_valid_name();
            if !keep {
                debug!("Dropping reference without a usable name: {:?}", r);
            }
            keep
        })
        .collect();

    let report = ValidationReport::from_records(kept);
    info!(
        "Validated {} of {} references ({} missing contact info)",
        report.validation_summary.total_references, parsed, report.validation_summary.missing_info
    );
    report
}
