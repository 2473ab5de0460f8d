//! Reference Validation Engine: free-text reference lines in, normalized
//! records and a contact-coverage summary out.

pub mod parser;
pub mod validation;

pub use parser::{parse_reference, try_parse_reference, ParseAmbiguity};
pub use validation::{validate, validate_candidates};
