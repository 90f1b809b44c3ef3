//! Resume text extraction from uploaded PDF documents.
//!
//! Only `application/pdf` uploads are parsed. Pages that yield no text are
//! skipped; a document with no text at all is not an error, the caller falls
//! back to the pasted background instead.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}': only PDF resumes can be uploaded")]
    UnsupportedFormat(String),

    #[error("Could not read the PDF: {0}")]
    ParseFailure(String),
}

/// Text recovered from an uploaded document. `pages` holds only the pages that
/// produced text, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub pages: Vec<String>,
    pub combined_text: String,
}

impl ExtractedDocument {
    fn from_page_texts(page_texts: Vec<String>) -> Self {
        let pages: Vec<String> = page_texts
            .into_iter()
            .filter(|text| !text.trim().is_empty())
            .collect();
        let combined_text = pages.join("\n");
        Self {
            pages,
            combined_text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.combined_text.trim().is_empty()
    }
}

/// Splits a PDF into per-page text. Implementations may fail or panic on
/// malformed input; `extract` converts both into `ParseFailure`.
pub trait PageTextReader: Send + Sync {
    fn page_texts(&self, document: &[u8]) -> Result<Vec<String>, String>;
}

/// Default reader backed by the `pdf-extract` crate.
pub struct PdfExtractReader;

impl PageTextReader for PdfExtractReader {
    fn page_texts(&self, document: &[u8]) -> Result<Vec<String>, String> {
        pdf_extract::extract_text_from_mem_by_pages(document).map_err(|e| e.to_string())
    }
}

/// Extracts the text of an uploaded document.
///
/// The declared media type is checked before any parsing happens.
pub fn extract(
    document: &[u8],
    declared_type: &str,
    reader: &dyn PageTextReader,
) -> Result<ExtractedDocument, ExtractionError> {
    if !is_pdf_media_type(declared_type) {
        return Err(ExtractionError::UnsupportedFormat(declared_type.to_string()));
    }

    let page_texts = catch_unwind(AssertUnwindSafe(|| reader.page_texts(document)))
        .map_err(|panic| ExtractionError::ParseFailure(panic_detail(panic.as_ref())))?
        .map_err(ExtractionError::ParseFailure)?;

    let total_pages = page_texts.len();
    let extracted = ExtractedDocument::from_page_texts(page_texts);
    debug!(
        "Extracted text from {}/{} PDF pages ({} chars)",
        extracted.pages.len(),
        total_pages,
        extracted.combined_text.len()
    );

    Ok(extracted)
}

/// True for `application/pdf`, ignoring case and media type parameters.
pub fn is_pdf_media_type(declared_type: &str) -> bool {
    declared_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
        .unwrap_or(false)
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("parser panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("parser panicked: {s}")
    } else {
        "parser panicked on malformed input".to_string()
    }
}
