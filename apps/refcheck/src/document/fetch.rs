use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::errors::AcquisitionError;

/// Raw resume bytes plus the filename used to pick a text extractor.
/// Dropped as soon as text extraction finishes.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub bytes: Bytes,
    pub filename: String,
}

/// Resolves a resume source (URL or path) into bytes.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<ResumeDocument, AcquisitionError>;
}

/// Fetches `http://` and `https://` sources over the network and reads
/// anything else from the local filesystem.
#[derive(Clone)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AcquisitionError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<ResumeDocument, AcquisitionError> {
        info!("Downloading resume from {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AcquisitionError::Status {
                status: status.as_u16(),
                source_url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(ResumeDocument {
            bytes,
            filename: filename_hint(url),
        })
    }

    async fn fetch_file(&self, path: &str) -> Result<ResumeDocument, AcquisitionError> {
        info!("Reading resume from {path}");
        let bytes = tokio::fs::read(path).await?;
        Ok(ResumeDocument {
            bytes: Bytes::from(bytes),
            filename: filename_hint(path),
        })
    }
}

#[async_trait]
impl DocumentFetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<ResumeDocument, AcquisitionError> {
        if is_remote(source) {
            self.fetch_url(source).await
        } else {
            self.fetch_file(source).await
        }
    }
}

fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Last path segment of a URL or filesystem path, without query or fragment.
pub fn filename_hint(source: &str) -> String {
    if is_remote(source) {
        if let Ok(url) = Url::parse(source) {
            return url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default()
                .to_string();
        }
    }
    let without_query = source.split(|c: char| c == '?' || c == '#').next().unwrap_or(source);
    Path::new(without_query)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_filename_hint_from_url_strips_query() {
        assert_eq!(
            filename_hint("https://cdn.example.com/resumes/u1/cv.pdf?token=abc#page=2"),
            "cv.pdf"
        );
    }

    #[test]
    fn test_filename_hint_from_path() {
        assert_eq!(filename_hint("/tmp/uploads/Jane_Doe.docx"), "Jane_Doe.docx");
        assert_eq!(filename_hint("resume.txt"), "resume.txt");
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("HTTPS://example.com/a.pdf"));
        assert!(!is_remote("/srv/a.pdf"));
        assert!(!is_remote("ftp://example.com/a.pdf"));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Jane Doe\njane@acme.com").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let fetcher = SourceFetcher::new(Duration::from_secs(5)).unwrap();
        let doc = fetcher.fetch(&path).await.unwrap();
        assert_eq!(&doc.bytes[..], b"Jane Doe\njane@acme.com");
        assert!(doc.filename.ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_io_error() {
        let fetcher = SourceFetcher::new(Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch("/nonexistent/dir/resume.pdf").await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Io(_)));
    }
}
