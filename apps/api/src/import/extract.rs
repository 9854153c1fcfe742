//! Text extraction from uploaded documents.
//!
//! PDF goes through `pdf-extract` first, then two salvage passes over the raw
//! bytes. DOCX text is read from `word/document.xml` inside the zip container.
//! Plain text and Markdown are decoded as UTF-8. Everything is synchronous;
//! callers run it under `spawn_blocking`.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Shortest extraction result treated as real text.
const MIN_TEXT_CHARS: usize = 10;

/// The printable-ASCII salvage must recover more than this.
const MIN_SALVAGE_CHARS: usize = 50;

/// Runs of the same character at least this long collapse to one.
const REPEAT_RUN: usize = 6;

static PDF_STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("pdf string regex is valid"));

static PDF_PAGE_RE: Lazy<regex::bytes::Regex> = Lazy::new(|| {
    regex::bytes::Regex::new(r"(?-u)/Type\s*/Page\b").expect("pdf page regex is valid")
});

static MD_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s{0,3}(?:#{1,6}|>)\s*").expect("heading regex is valid"));

static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex is valid"));

static MD_EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*|__|`").expect("emphasis regex is valid"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX, TXT or Markdown file.")]
    Unsupported(String),

    #[error("Legacy .doc files are not supported. Please save as DOCX or PDF and upload again.")]
    LegacyWord,

    #[error("File is {size} bytes; uploads must be smaller than {limit} bytes.")]
    TooLarge { size: usize, limit: usize },

    #[error("The uploaded file is empty")]
    Empty,

    #[error("Unable to parse PDF. The file may be image-based or password-protected. Please try uploading a TXT file instead.")]
    NoReadableText,

    #[error("Unable to read the Word document. Please upload a PDF or TXT file instead.")]
    UnreadableDocx,

    #[error("Text file is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
    Markdown,
}

impl DocumentKind {
    /// Decides the kind from the declared content type and the file extension.
    /// Either one is enough.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractError> {
        let ext = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let mime = content_type.unwrap_or("").to_lowercase();

        if ext == "docx" || mime.contains("wordprocessingml") {
            return Ok(DocumentKind::Docx);
        }
        if ext == "doc" || mime == "application/msword" {
            return Err(ExtractError::LegacyWord);
        }
        if ext == "pdf" || mime.contains("pdf") {
            return Ok(DocumentKind::Pdf);
        }
        if matches!(ext.as_str(), "md" | "markdown") || mime == "text/markdown" {
            return Ok(DocumentKind::Markdown);
        }
        if ext == "txt" || mime == "text/plain" {
            return Ok(DocumentKind::Text);
        }

        let label = if !ext.is_empty() {
            format!(".{ext}")
        } else if !mime.is_empty() {
            mime
        } else {
            "unknown".to_string()
        };
        Err(ExtractError::Unsupported(label))
    }
}

/// Extracts and cleans the text of an uploaded document, keeping line breaks.
pub fn extract_text(bytes: &[u8], kind: DocumentKind, limit: usize) -> Result<String, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::Empty);
    }
    if bytes.len() > limit {
        return Err(ExtractError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    let raw = match kind {
        DocumentKind::Pdf => extract_pdf_text(bytes)?,
        DocumentKind::Docx => extract_docx_text(bytes)?,
        DocumentKind::Text => decode_utf8(bytes)?,
        DocumentKind::Markdown => strip_markdown(&decode_utf8(bytes)?),
    };

    let text = clean_extracted_text(&raw);
    if text.is_empty() {
        return Err(match kind {
            DocumentKind::Pdf => ExtractError::NoReadableText,
            DocumentKind::Docx => ExtractError::UnreadableDocx,
            _ => ExtractError::Empty,
        });
    }
    Ok(text)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8)?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// `pdf-extract`, then printable-ASCII salvage, then literal PDF strings.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed files.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) if text.trim().chars().count() >= MIN_TEXT_CHARS => {
            debug!("pdf-extract recovered {} chars", text.len());
            return Ok(text);
        }
        Ok(Ok(_)) => warn!("pdf-extract returned no usable text; trying salvage"),
        Ok(Err(e)) => warn!("pdf-extract failed: {e}; trying salvage"),
        Err(_) => warn!("pdf-extract panicked; trying salvage"),
    }

    let printable = salvage_printable(bytes);
    if printable.chars().count() > MIN_SALVAGE_CHARS {
        return Ok(printable);
    }

    let strings = salvage_pdf_strings(bytes);
    if strings.chars().count() >= MIN_TEXT_CHARS {
        return Ok(strings);
    }

    Err(ExtractError::NoReadableText)
}

/// Body text of a DOCX: one line per paragraph, tabs and breaks kept.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        warn!("DOCX is not a readable zip archive: {e}");
        ExtractError::UnreadableDocx
    })?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| {
            warn!("DOCX has no main document part: {e}");
            ExtractError::UnreadableDocx
        })?
        .read_to_string(&mut xml)
        .map_err(|e| {
            warn!("DOCX document part is unreadable: {e}");
            ExtractError::UnreadableDocx
        })?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text_run = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => match t.unescape() {
                Ok(run) => text.push_str(&run),
                Err(e) => debug!("Skipping undecodable DOCX text run: {e}"),
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("DOCX XML is malformed: {e}");
                return Err(ExtractError::UnreadableDocx);
            }
        }
    }
    debug!("DOCX extraction recovered {} chars", text.len());
    Ok(text)
}

/// Page objects in the raw PDF; at least one.
pub fn count_pdf_pages(bytes: &[u8]) -> usize {
    PDF_PAGE_RE.find_iter(bytes).count().max(1)
}

/// Printable ASCII (plus tab and newlines) with whitespace collapsed.
fn salvage_printable(bytes: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(bytes);
    let printable: String = lossy
        .chars()
        .map(|c| {
            if matches!(c, '\x20'..='\x7e' | '\n' | '\r' | '\t') {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&printable)
}

/// Joins the `( ... )` string literals found in the raw PDF bytes.
fn salvage_pdf_strings(bytes: &[u8]) -> String {
    let latin1: String = bytes.iter().map(|&b| b as char).collect();
    PDF_STRING_RE
        .captures_iter(&latin1)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|chunk| chunk.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_markdown(text: &str) -> String {
    let text = MD_HEADING_RE.replace_all(text, "");
    let text = MD_LINK_RE.replace_all(&text, "$1 ($2)");
    MD_EMPHASIS_RE.replace_all(&text, "").into_owned()
}

/// Drops NULs, blanks other control characters, collapses long runs of one
/// repeated character and trims. Line breaks are kept (CRLF becomes LF).
pub fn clean_extracted_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut cleaned = String::with_capacity(normalized.len());
    for c in normalized.chars() {
        match c {
            '\0' => {}
            '\u{01}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
                cleaned.push(' ')
            }
            _ => cleaned.push(c),
        }
    }
    collapse_repeats(&cleaned).trim().to_string()
}

/// `clean_extracted_text` followed by collapsing all whitespace to single spaces.
pub fn clean_extracted_text_flat(text: &str) -> String {
    collapse_whitespace(&clean_extracted_text(text))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collapse_repeats(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        if run >= REPEAT_RUN {
            out.push(c);
        } else {
            out.extend(std::iter::repeat(c).take(run));
        }
        i += run;
    }
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    #[test]
    fn test_detect_by_extension_or_mime() {
        assert_eq!(DocumentKind::detect(Some("cv.PDF"), None).unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::detect(Some("blob"), Some("application/pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(DocumentKind::detect(Some("cv.txt"), None).unwrap(), DocumentKind::Text);
        assert_eq!(DocumentKind::detect(Some("cv.md"), None).unwrap(), DocumentKind::Markdown);
        assert_eq!(
            DocumentKind::detect(None, Some("text/plain")).unwrap(),
            DocumentKind::Text
        );
    }

    fn docx(document_xml: &str) -> Vec<u8> {
        use std::io::Write;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    pub(crate) fn sample_docx() -> Vec<u8> {
        docx(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
            r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>Experience</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t xml:space="preserve">Engineer at </w:t></w:r><w:r><w:t>Acme &amp; Co</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:t>2019</w:t><w:tab/><w:t>- 2021</w:t></w:r></w:p>"#,
            r#"</w:body></w:document>"#,
        ))
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let text = extract_text(&sample_docx(), DocumentKind::Docx, 64 * 1024).unwrap();
        assert_eq!(
            text,
            "Jane Doe\njane@example.com\nExperience\nEngineer at Acme & Co\n2019\t- 2021"
        );
    }

    #[test]
    fn test_docx_without_document_part_is_unreadable() {
        assert!(matches!(
            extract_docx_text(b"PK\x03\x04 not really a zip"),
            Err(ExtractError::UnreadableDocx)
        ));
        let empty = docx("<w:document><w:body></w:body></w:document>");
        assert!(matches!(
            extract_text(&empty, DocumentKind::Docx, 64 * 1024),
            Err(ExtractError::UnreadableDocx)
        ));
    }

    #[test]
    fn test_detect_rejects_word_and_unknown() {
        assert_eq!(
            DocumentKind::detect(Some("cv.docx"), None).unwrap(),
            DocumentKind::Docx
        );
        assert!(matches!(
            DocumentKind::detect(Some("cv.doc"), None),
            Err(ExtractError::LegacyWord)
        ));
        assert!(matches!(
            DocumentKind::detect(None, Some("application/msword")),
            Err(ExtractError::LegacyWord)
        ));
        match DocumentKind::detect(Some("photo.png"), Some("image/png")) {
            Err(ExtractError::Unsupported(label)) => assert_eq!(label, ".png"),
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_plain_text() {
        let text = extract_text(b"\xef\xbb\xbfJane Doe\r\nEngineer\n", DocumentKind::Text, LIMIT).unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[test]
    fn test_extract_limits_and_encoding() {
        assert!(matches!(
            extract_text(b"", DocumentKind::Text, LIMIT),
            Err(ExtractError::Empty)
        ));
        assert!(matches!(
            extract_text(&[b'a'; 20], DocumentKind::Text, 10),
            Err(ExtractError::TooLarge { size: 20, limit: 10 })
        ));
        assert!(matches!(
            extract_text(&[0xff, 0xfe, 0x41], DocumentKind::Text, LIMIT),
            Err(ExtractError::InvalidUtf8)
        ));
        assert!(matches!(
            extract_text(b"  \n ", DocumentKind::Text, LIMIT),
            Err(ExtractError::Empty)
        ));
    }

    #[test]
    fn test_markdown_is_flattened() {
        let md = "# Jane Doe\n**Senior Engineer**\n[Portfolio](https://jane.dev)\n- Built `tools`";
        let text = extract_text(md.as_bytes(), DocumentKind::Markdown, LIMIT).unwrap();
        assert_eq!(
            text,
            "Jane Doe\nSenior Engineer\nPortfolio (https://jane.dev)\n- Built tools"
        );
    }

    #[test]
    fn test_clean_extracted_text() {
        assert_eq!(clean_extracted_text("a\0b\u{7}c"), "ab c");
        assert_eq!(clean_extracted_text("Skills ==========\nRust"), "Skills =\nRust");
        assert_eq!(clean_extracted_text("aaaaa"), "aaaaa");
        assert_eq!(clean_extracted_text_flat("  one\n\n two\tthree "), "one two three");
    }

    #[test]
    fn test_pdf_salvage_recovers_printable_text() {
        let mut bytes = b"%PDF-1.4 garbage ".to_vec();
        bytes.extend_from_slice(&[0x00, 0x9c, 0xff]);
        bytes.extend_from_slice(b" Jane Doe Senior Software Engineer with ten years of experience");
        let text = extract_pdf_text(&bytes).unwrap();
        assert!(text.contains("Jane Doe Senior Software Engineer"));
        assert!(!text.contains('\u{fffd}'));
    }

    #[test]
    fn test_pdf_without_text_is_unreadable() {
        let bytes = [0x00u8, 0x01, 0x02, 0xff, 0xfe];
        assert!(matches!(
            extract_pdf_text(&bytes),
            Err(ExtractError::NoReadableText)
        ));
    }

    #[test]
    fn test_count_pdf_pages_ignores_page_tree() {
        let bytes = b"<< /Type /Pages /Count 2 >> << /Type /Page >> << /Type/Page/Parent 1 0 R >>";
        assert_eq!(count_pdf_pages(bytes), 2);
        assert_eq!(count_pdf_pages(b"no pages"), 1);
    }

    #[test]
    fn test_pdf_string_salvage() {
        assert_eq!(
            salvage_pdf_strings(b"BT (Jane) Tj (Doe) Tj (x) Tj ET"),
            "Jane Doe"
        );
    }
}
