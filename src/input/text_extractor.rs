//! Text extraction from document payloads

use crate::error::{Result, SkillGapError};
use crate::processing::document::{Document, DocumentKind};
use log::{info, warn};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Resource bounds applied while extracting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionLimits {
    pub max_document_bytes: usize,
    pub max_pdf_pages: usize,
    pub max_docx_xml_bytes: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            max_pdf_pages: 200,
            max_docx_xml_bytes: 32 * 1024 * 1024,
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8], limits: &ExtractionLimits) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    /// Pages are read in order; a page without extractable text (a scanned
    /// image, say) contributes an empty string instead of failing the file.
    fn extract(&self, bytes: &[u8], limits: &ExtractionLimits) -> Result<String> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| SkillGapError::parse(DocumentKind::Pdf, e))?;

        let pages = doc.get_pages();
        if pages.len() > limits.max_pdf_pages {
            return Err(SkillGapError::DocumentTooLarge {
                kind: DocumentKind::Pdf,
                actual: pages.len(),
                limit: limits.max_pdf_pages,
                unit: "pages",
            });
        }

        let mut page_texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => page_texts.push(text),
                Err(e) => {
                    warn!("No extractable text on PDF page {}: {}", page_number, e);
                    page_texts.push(String::new());
                }
            }
        }

        Ok(page_texts.join("\n"))
    }
}

pub struct DocxExtractor;

const DOCX_BODY: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    /// Paragraph texts in document order, joined by single spaces so words
    /// from neighbouring paragraphs never fuse.
    fn extract(&self, bytes: &[u8], limits: &ExtractionLimits) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| SkillGapError::parse(DocumentKind::Docx, e))?;

        let entry = archive.by_name(DOCX_BODY).map_err(|e| {
            SkillGapError::parse(DocumentKind::Docx, format!("cannot open {}: {}", DOCX_BODY, e))
        })?;

        let too_large = |actual: usize| SkillGapError::DocumentTooLarge {
            kind: DocumentKind::Docx,
            actual,
            limit: limits.max_docx_xml_bytes,
            unit: "bytes of uncompressed XML",
        };

        let declared = usize::try_from(entry.size()).unwrap_or(usize::MAX);
        if declared > limits.max_docx_xml_bytes {
            return Err(too_large(declared));
        }

        // Header sizes can lie; never inflate past the limit
        let mut raw = Vec::new();
        entry
            .take(limits.max_docx_xml_bytes as u64 + 1)
            .read_to_end(&mut raw)
            .map_err(|e| SkillGapError::parse(DocumentKind::Docx, e))?;
        if raw.len() > limits.max_docx_xml_bytes {
            return Err(too_large(raw.len()));
        }
        let xml = String::from_utf8(raw)
            .map_err(|e| SkillGapError::parse(DocumentKind::Docx, e))?;

        let paragraphs = docx_paragraphs(&xml)?;
        Ok(paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Collect the text of every `w:p` element.
///
/// Elements are matched by local name, so any namespace prefix works.
/// Paragraphs nested inside text boxes are emitted before their enclosing
/// paragraph.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(XmlEvent::Empty(e)) => match e.local_name().as_ref() {
                b"tab" | b"br" | b"cr" => {
                    if let Some(paragraph) = open.last_mut() {
                        paragraph.push(' ');
                    }
                }
                _ => {}
            },
            Ok(XmlEvent::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| SkillGapError::parse(DocumentKind::Docx, e))?;
                if let Some(paragraph) = open.last_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(XmlEvent::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Ok(XmlEvent::Eof) => break,
            Err(e) => {
                return Err(SkillGapError::parse(
                    DocumentKind::Docx,
                    format!("malformed {} at byte {}: {}", DOCX_BODY, reader.buffer_position(), e),
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], _limits: &ExtractionLimits) -> Result<String> {
        let markdown = std::str::from_utf8(bytes)
            .map_err(|e| SkillGapError::parse(DocumentKind::Markdown, e))?;

        let mut text = String::with_capacity(markdown.len());
        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(
                    Tag::Paragraph
                    | Tag::Heading(..)
                    | Tag::Item
                    | Tag::CodeBlock(_)
                    | Tag::BlockQuote
                    | Tag::TableCell,
                ) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], _limits: &ExtractionLimits) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| SkillGapError::parse(DocumentKind::PlainText, e))
    }
}

/// Routes a document to the extractor for its declared kind
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    limits: ExtractionLimits,
}

impl DocumentExtractor {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    pub fn extract(&self, document: &Document) -> Result<String> {
        let kind = document.kind();
        if document.len() > self.limits.max_document_bytes {
            return Err(SkillGapError::DocumentTooLarge {
                kind,
                actual: document.len(),
                limit: self.limits.max_document_bytes,
                unit: "bytes",
            });
        }

        info!("Extracting text from {} document ({} bytes)", kind, document.len());
        let bytes = document.bytes();
        match kind {
            DocumentKind::Pdf => PdfExtractor.extract(bytes, &self.limits),
            DocumentKind::Docx => DocxExtractor.extract(bytes, &self.limits),
            DocumentKind::Markdown => MarkdownExtractor.extract(bytes, &self.limits),
            DocumentKind::PlainText => PlainTextExtractor.extract(bytes, &self.limits),
        }
    }
}

/// Extract with default limits
pub fn extract(document: &Document) -> Result<String> {
    DocumentExtractor::default().extract(document)
}
