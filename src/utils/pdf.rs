// PDF text provider: loads a document and returns its plain text page by page.
// Unreadable pages are skipped with a warning instead of failing the whole file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lopdf::{Document, ObjectId};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PdfTextError {
    #[error("failed to open PDF {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("failed to extract text from page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

/// Something that can hand out plain text one page at a time.
pub trait PageTextSource {
    /// Page numbers in document order, starting at 1.
    fn page_numbers(&self) -> Vec<u32>;

    /// Text of a single page. `Ok(None)` means the page object is null.
    fn page_text(&self, page: u32) -> Result<Option<String>, PdfTextError>;
}

/// A parsed PDF. The input file is read completely by `load`, so no file
/// handle outlives that call.
pub struct PdfDocument {
    doc: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfDocument {
    pub fn load(path: &Path) -> Result<Self, PdfTextError> {
        let doc = Document::load(path).map_err(|source| PdfTextError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageTextSource for PdfDocument {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    fn page_text(&self, page: u32) -> Result<Option<String>, PdfTextError> {
        let Some(&page_id) = self.pages.get(&page) else {
            return Ok(None);
        };
        if self.doc.get_dictionary(page_id).is_err() {
            return Ok(None);
        }

        self.doc
            .extract_text(&[page])
            .map(Some)
            .map_err(|e| PdfTextError::Page {
                page,
                source: Box::new(e),
            })
    }
}

/// Joins the text of every readable page with `\n`.
/// Returns an empty string when no page produced any text.
pub fn collect_page_texts<S: PageTextSource + ?Sized>(source: &S) -> String {
    let mut texts = Vec::new();

    for page in source.page_numbers() {
        match source.page_text(page) {
            Ok(Some(text)) if !text.is_empty() => texts.push(text),
            Ok(Some(_)) => debug!(page, "Page has no text"),
            Ok(None) => debug!(page, "Skipping null page"),
            Err(e) => warn!(page, "Error reading page: {}", e),
        }
    }

    texts.join("\n")
}

/// Extracts the plain text of every page in the PDF at `path`.
pub fn extract_text_from_pdf_file(path: &Path) -> Result<String, PdfTextError> {
    info!(path = %path.display(), "Opening PDF");
    let pdf = PdfDocument::load(path)?;
    info!(pages = pdf.page_count(), "PDF loaded");

    let text = collect_page_texts(&pdf);
    info!(chars = text.chars().count(), "PDF text extraction finished");
    Ok(text)
}
