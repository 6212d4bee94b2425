//! File type detection

use crate::error::{Result, SkillGapError};
use crate::processing::document::DocumentKind;
use std::path::Path;

/// Decide the document kind for a file: extension first, then magic bytes.
pub fn detect_kind(path: &Path, bytes: &[u8]) -> Result<DocumentKind> {
    if let Some(kind) = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentKind::from_extension)
    {
        return Ok(kind);
    }

    DocumentKind::sniff(bytes).ok_or_else(|| {
        SkillGapError::UnsupportedFormat(format!("Unsupported file type for: {}", path.display()))
    })
}
