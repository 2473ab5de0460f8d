//! Per-run artifact directory holding the parsed chunks.
//!
//! No embeddings are computed; the directory is a stable handle for a later
//! indexing step.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;
use uuid::Uuid;

use crate::errors::StageError;

pub const CHUNKS_FILE: &str = "chunks.json";

/// `<role>_<organization>_<YYYYmmdd_HHMMSS>_<8 hex chars>`. The random
/// suffix keeps concurrent runs for the same role apart.
pub fn vectorstore_key(role: &str, organization: &str, at: DateTime<Local>, id: Uuid) -> String {
    let id = id.simple().to_string();
    format!(
        "{}_{}_{}_{}",
        slug(role),
        slug(organization),
        at.format("%Y%m%d_%H%M%S"),
        &id[..8]
    )
}

pub async fn build_vectorstore(
    root: &Path,
    role: &str,
    organization: &str,
    chunks: &[String],
) -> Result<PathBuf, StageError> {
    let dir = root.join(vectorstore_key(role, organization, Local::now(), Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await?;

    let payload = serde_json::to_vec_pretty(chunks)?;
    tokio::fs::write(dir.join(CHUNKS_FILE), payload).await?;

    info!("Vectorstore path created: {} ({} chunks)", dir.display(), chunks.len());
    Ok(dir)
}

/// Lowercase ASCII alphanumerics with single hyphens between words.
fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let out = out.trim_end_matches('-').to_string();
    if out.is_empty() {
        "unknown".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Senior Software Engineer"), "senior-software-engineer");
        assert_eq!(slug("  St. Mary's / ICU "), "st-mary-s-icu");
        assert_eq!(slug("../.."), "unknown");
    }

    #[test]
    fn test_key_layout() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        assert_eq!(
            vectorstore_key("Nurse", "Acme Health", at, id),
            "nurse_acme-health_20240309_140507_a1b2c3d4"
        );
    }

    #[tokio::test]
    async fn test_build_writes_chunks() {
        let root = tempfile::tempdir().unwrap();
        let chunks = vec!["first".to_string(), "second".to_string()];

        let a = build_vectorstore(root.path(), "Nurse", "Acme", &chunks).await.unwrap();
        let b = build_vectorstore(root.path(), "Nurse", "Acme", &chunks).await.unwrap();
        assert_ne!(a, b);

        let stored: Vec<String> =
            serde_json::from_slice(&std::fs::read(a.join(CHUNKS_FILE)).unwrap()).unwrap();
        assert_eq!(stored, chunks);
    }
}
