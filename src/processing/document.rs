//! Document payloads and their declared kinds

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Markdown,
    PlainText,
}

impl DocumentKind {
    /// Map a file extension (without the dot) to a document kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "md" | "markdown" => Some(DocumentKind::Markdown),
            "txt" | "text" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Guess the kind from leading magic bytes.
    ///
    /// Only binary containers are recognised; text payloads have no
    /// reliable signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF-") {
            Some(DocumentKind::Pdf)
        } else if bytes.starts_with(b"PK\x03\x04") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Docx => write!(f, "DOCX"),
            DocumentKind::Markdown => write!(f, "Markdown"),
            DocumentKind::PlainText => write!(f, "plain text"),
        }
    }
}

/// An uploaded payload together with its declared kind.
///
/// Immutable once constructed; consumed by the document extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    kind: DocumentKind,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }

    /// Wrap text pasted directly by a user
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::PlainText,
            bytes: text.into().into_bytes(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
