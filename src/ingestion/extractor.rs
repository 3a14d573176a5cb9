//! Fail-safe plain-text extraction from uploaded bytes
//!
//! Extraction never fails: unreadable or unsupported content degrades to an
//! empty string, which the classifier treats as "no matches" downstream.

use std::path::Path;

/// Plain-text extractor dispatching on declared content type and extension
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from uploaded bytes
    ///
    /// Dispatch order: PDF when the declared content type ends with "pdf" or
    /// the extension is `pdf`; DOCX when the content type mentions "word" or
    /// the extension is `docx`; otherwise a permissive UTF-8 decode. Any
    /// parse failure yields an empty string.
    pub fn extract(filename: &str, content_type: Option<&str>, data: &[u8]) -> String {
        let content_type = content_type.unwrap_or("").to_lowercase();
        let extension = file_extension(filename);

        if content_type.ends_with("pdf") || extension == "pdf" {
            Self::pdf_text(filename, data)
        } else if content_type.contains("word") || extension == "docx" {
            Self::docx_text(filename, data)
        } else {
            Self::plain_text(data)
        }
    }

    /// Extract page text from a PDF
    ///
    /// pdf-extract panics on some page trees (a page without a MediaBox, for
    /// one) and can stall on problematic fonts, so it runs on its own thread
    /// with a timeout. A crashed or overdue extraction degrades to an empty
    /// string instead of unwinding the ingest worker.
    fn pdf_text(filename: &str, data: &[u8]) -> String {
        use std::sync::mpsc;
        use std::thread;
        use std::time::Duration;

        let bytes = data.to_vec();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&bytes);
            let _ = tx.send(result);
        });

        // Wait up to 60 seconds for PDF extraction
        match rx.recv_timeout(Duration::from_secs(60)) {
            Ok(Ok(text)) => {
                let _ = handle.join();
                text
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                tracing::warn!("Failed to extract PDF text from '{}': {}", filename, e);
                String::new()
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The thread cannot be killed; it is left to finish on its own
                tracing::warn!("PDF extraction timed out after 60s for '{}'", filename);
                String::new()
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                tracing::warn!("PDF extraction crashed for '{}'", filename);
                String::new()
            }
        }
    }

    /// Extract paragraph text from a DOCX archive, one line per paragraph
    fn docx_text(filename: &str, data: &[u8]) -> String {
        let doc = match docx_rs::read_docx(data) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Failed to read DOCX '{}': {}", filename, e);
                return String::new();
            }
        };

        let mut text = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                text.push('\n');
            }
        }

        text
    }

    /// Permissive text decode; invalid sequences are substituted, not fatal
    fn plain_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}

/// Lower-cased file extension, empty when the filename has none
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}
