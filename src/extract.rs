//! Uploaded-artifact text extraction (DOCX, PDF, images, plain text).
//!
//! Detects the content kind by magic bytes and returns plain UTF-8 text, or
//! the raw image for the multimodal design path. Word-processor extraction
//! reads paragraph text only; tables, headers, and embedded images are
//! ignored. A PDF page yielding no extractable text contributes an empty
//! string, not an error.

use std::io::Read;
use tracing::debug;

use crate::error::AppError;
use crate::models::ImageAttachment;

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Result of extraction: text for documents, the raw bytes for images.
#[derive(Debug, Clone)]
pub enum Extracted {
    Text(String),
    Image(ImageAttachment),
}

/// Extracts content from an uploaded artifact, sniffing the format from its
/// leading bytes. Unrecognized binary content is an extraction error.
pub fn extract(bytes: &[u8]) -> Result<Extracted, AppError> {
    if bytes.starts_with(b"%PDF") {
        debug!("detected PDF input");
        extract_pdf(bytes).map(Extracted::Text)
    } else if bytes.starts_with(b"PK\x03\x04") {
        debug!("detected DOCX input");
        extract_docx(bytes).map(Extracted::Text)
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Ok(Extracted::Image(ImageAttachment {
            bytes: bytes.to_vec(),
            mime: "image/png",
        }))
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Ok(Extracted::Image(ImageAttachment {
            bytes: bytes.to_vec(),
            mime: "image/jpeg",
        }))
    } else {
        String::from_utf8(bytes.to_vec())
            .map(Extracted::Text)
            .map_err(|_| {
                AppError::Extraction(
                    "unrecognized file content; expected .docx, .pdf, .png, .jpeg, or plain text"
                        .to_string(),
                )
            })
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("PDF extraction failed: {}", e)))
}

/// Extracts paragraph text from a DOCX: `word/document.xml` → `<w:t>` runs,
/// with paragraph boundaries becoming newlines.
fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("DOCX open failed: {}", e)))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| AppError::Extraction("word/document.xml not found".to_string()))?;

    let mut doc_xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| AppError::Extraction(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(AppError::Extraction(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }

    extract_paragraph_runs(&doc_xml)
}

fn extract_paragraph_runs(xml: &[u8]) -> Result<String, AppError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    if let Ok(quick_xml::events::Event::Text(te)) = reader.read_event_into(&mut buf)
                    {
                        out.push_str(te.unescape().unwrap_or_default().as_ref());
                    }
                }
            }
            Ok(quick_xml::events::Event::End(e)) => {
                // Paragraph boundary: one newline, blank paragraphs collapse.
                if e.local_name().as_ref() == b"p" && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(AppError::Extraction(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out.trim_end().to_string())
}
