//! Text Extractor — uploaded resume bytes → plain text.

use axum::body::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("document contains no extractable text")]
    Empty,
}

/// Declared or sniffed format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Content type wins, then the file extension, then the `%PDF-` magic.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>, bytes: &[u8]) -> Option<Self> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("application/pdf") => return Some(DocumentFormat::Pdf),
            Some("text/plain") | Some("text/markdown") => return Some(DocumentFormat::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => return Some(DocumentFormat::Pdf),
            Some("txt") | Some("md") => return Some(DocumentFormat::PlainText),
            _ => {}
        }

        bytes.starts_with(b"%PDF-").then_some(DocumentFormat::Pdf)
    }
}

/// Extracts text synchronously. PDF pages keep their order and are joined by
/// a newline. PDF parsing is CPU-bound; async callers should go through
/// [`extract_text_blocking`].
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?
            .join("\n"),
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    debug!(chars = text.len(), ?format, "Extracted resume text");
    Ok(text)
}

/// Runs [`extract_text`] on the blocking pool.
pub async fn extract_text_blocking(bytes: Bytes, format: DocumentFormat) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal uncompressed PDF with one Helvetica text line per page.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                4 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[test]
    fn test_detect_prefers_content_type() {
        assert_eq!(
            DocumentFormat::detect(Some("application/pdf"), Some("resume.txt"), b""),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::detect(Some("text/plain; charset=utf-8"), None, b""),
            Some(DocumentFormat::PlainText)
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension_then_magic() {
        assert_eq!(
            DocumentFormat::detect(Some("application/octet-stream"), Some("CV.PDF"), b""),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::detect(None, Some("notes.md"), b""),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(
            DocumentFormat::detect(None, Some("upload"), b"%PDF-1.7\n..."),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(DocumentFormat::detect(None, Some("resume.docx"), b"PK\x03\x04"), None);
    }

    #[test]
    fn test_plain_text_is_decoded() {
        let text = extract_text(b"Jane Doe\nRust engineer", DocumentFormat::PlainText).unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[test]
    fn test_blank_document_is_empty_error() {
        assert!(matches!(
            extract_text(b"  \n\t ", DocumentFormat::PlainText),
            Err(ExtractError::Empty)
        ));
    }

    #[test]
    fn test_pdf_pages_are_joined_by_newline_in_order() {
        let pdf = pdf_with_pages(&["Jane Doe Rust", "Tokio Axum"]);
        let text = extract_text(&pdf, DocumentFormat::Pdf).unwrap();

        assert!(!text.contains("RustTokio"), "pages glued together: {text:?}");
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Jane Doe Rust", "Tokio Axum"]);
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_pdf_error() {
        let result = extract_text_blocking(
            Bytes::from_static(b"definitely not a pdf"),
            DocumentFormat::Pdf,
        )
        .await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }
}
