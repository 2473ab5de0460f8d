//! Word (.docx) text extraction.
//!
//! A .docx file is a ZIP archive; the body lives in `word/document.xml`.
//! Body paragraphs come first, then table text row by row.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::DocumentError;

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Docx(format!("Failed to open archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Docx(format!("Missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(format!("Failed to read document.xml: {e}")))?;

    text_from_document_xml(&xml)
}

/// Flattens WordprocessingML into text: body paragraphs separated by
/// newlines, followed by one line per table row with cells joined by a space.
pub fn text_from_document_xml(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    let mut table_rows: Vec<String> = Vec::new();
    let mut row_cells: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut paragraph = String::new();
    let mut table_depth = 0usize;
    let mut in_text = false;
    // Tab stops under <w:pPr><w:tabs> are layout, not text.
    let mut in_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tr" => row_cells.clear(),
                b"tc" => cell.clear(),
                b"p" => paragraph.clear(),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" if in_run => paragraph.push('\t'),
                b"br" | b"cr" if in_run => paragraph.push('\n'),
                // <w:p/> is an empty paragraph, still a line in the output
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| DocumentError::Docx(format!("Bad text node: {e}")))?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" => {
                    let finished = std::mem::take(&mut paragraph);
                    if table_depth == 0 {
                        paragraphs.push(finished);
                    } else {
                        if !cell.is_empty() {
                            cell.push('\n');
                        }
                        cell.push_str(&finished);
                    }
                }
                b"tc" => row_cells.push(std::mem::take(&mut cell)),
                b"tr" => table_rows.push(std::mem::take(&mut row_cells).join(" ")),
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Docx(format!(
                    "XML error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    let mut text = paragraphs.join("\n");
    if !table_rows.is_empty() {
        text.push('\n');
        text.push_str(&table_rows.join("\n"));
    }
    Ok(text)
}
