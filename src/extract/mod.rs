//! Raw text extraction from résumé files.
//!
//! PDF goes through `pdf-extract`; DOCX is read straight from the
//! `word/document.xml` part of the zip container; plain text is decoded as
//! lossy UTF-8. Line breaks are kept because section headings are detected
//! line by line.

use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::LazyLock;

static LINE_BREAK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("line break pattern is valid")
});
static TAB_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:tab\s*/>").expect("tab pattern is valid"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("entity pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &["pdf", "docx", "txt", "text", "md"];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" | "text" | "md" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }
}

/// Reads `path` and extracts its text according to `extension`.
pub fn extract_text(path: &Path, extension: &str) -> Result<String> {
    let origin = path.display().to_string();
    let format = DocumentFormat::from_extension(extension).ok_or_else(|| {
        EtlError::UnsupportedFileFormat {
            path: origin.clone(),
            extension: extension.to_string(),
        }
    })?;

    let bytes = std::fs::read(path).map_err(|e| EtlError::TextExtractionFailure {
        path: origin.clone(),
        message: e.to_string(),
    })?;

    extract_from_bytes(&bytes, format, &origin)
}

/// Extracts text from in-memory document bytes. `origin` names the document
/// in errors.
pub fn extract_from_bytes(bytes: &[u8], format: DocumentFormat, origin: &str) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| EtlError::TextExtractionFailure {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        }
        DocumentFormat::Docx => docx_text(bytes, origin)?,
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    tracing::debug!("Extracted {} characters from {}", text.len(), origin);
    Ok(text)
}

fn docx_text(bytes: &[u8], origin: &str) -> Result<String> {
    let failure = |message: String| EtlError::TextExtractionFailure {
        path: origin.to_string(),
        message,
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| failure(format!("not a DOCX container: {}", e)))?;
    let mut part = archive
        .by_name("word/document.xml")
        .map_err(|e| failure(format!("missing word/document.xml: {}", e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| failure(format!("unreadable document part: {}", e)))?;

    Ok(docx_xml_to_text(&xml))
}

/// Flattens WordprocessingML into text: paragraphs and breaks become
/// newlines, tabs stay tabs, every other tag is dropped.
pub fn docx_xml_to_text(xml: &str) -> String {
    let text = LINE_BREAK_TAG.replace_all(xml, "\n");
    let text = TAB_TAG.replace_all(&text, "\t");
    let text = ANY_TAG.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("word/document.xml", FileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension(".docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_extension("txt"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_extension("doc"), None);
    }

    #[test]
    fn test_docx_xml_to_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>R&amp;D</w:t><w:tab/><w:t>&lt;lead&gt;</w:t><w:br/><w:t>caf&#233;</w:t></w:r></w:p></w:body></w:document>"#;

        assert_eq!(docx_xml_to_text(xml), "Jane Doe\nR&D\t<lead>\ncafé\n");
    }

    #[test]
    fn test_extract_docx_from_bytes() {
        let bytes = build_docx(
            "<w:document><w:body><w:p><w:r><w:t>Experience</w:t></w:r></w:p><w:p><w:r><w:t>Led a team.</w:t></w:r></w:p></w:body></w:document>",
        );

        let text = extract_from_bytes(&bytes, DocumentFormat::Docx, "cv.docx").unwrap();
        assert_eq!(text, "Experience\nLed a team.\n");
    }

    #[test]
    fn test_corrupt_docx_is_extraction_failure() {
        let result = extract_from_bytes(b"not a zip", DocumentFormat::Docx, "broken.docx");
        assert!(matches!(
            result,
            Err(EtlError::TextExtractionFailure { ref path, .. }) if path == "broken.docx"
        ));
    }

    #[test]
    fn test_extract_text_rejects_unsupported_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.odt");
        std::fs::write(&path, b"whatever").unwrap();

        let result = extract_text(&path, "odt");
        assert!(matches!(result, Err(EtlError::UnsupportedFileFormat { .. })));
    }

    #[test]
    fn test_extract_plain_text_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Skills\nRust").unwrap();

        assert_eq!(extract_text(&path, "txt").unwrap(), "Skills\nRust");
        assert!(matches!(
            extract_text(&dir.path().join("missing.txt"), "txt"),
            Err(EtlError::TextExtractionFailure { .. })
        ));
    }
}
