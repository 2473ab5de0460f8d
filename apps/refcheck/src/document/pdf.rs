use super::DocumentError;

/// PDF text via the pdf-extract crate. Pages are joined in order with a
/// newline; a page without a text layer contributes an empty segment.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, DocumentError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| DocumentError::Pdf(e.to_string()))?;
    Ok(join_pages(&pages))
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}
