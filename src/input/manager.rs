//! Input manager: reads files from disk and hands them to the extractor

use crate::error::{Result, SkillGapError};
use crate::input::file_detector::detect_kind;
use crate::input::text_extractor::{DocumentExtractor, ExtractionLimits};
use crate::processing::document::Document;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    extractor: DocumentExtractor,
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            extractor: DocumentExtractor::default(),
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_limits(mut self, limits: ExtractionLimits) -> Self {
        self.extractor = DocumentExtractor::new(limits);
        self
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file and detect its kind without extracting
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let kind = detect_kind(path, &bytes)?;
        Ok(Document::new(kind, bytes))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let document = self.load_document(path).await?;
        info!("Read {} file: {}", document.kind(), path.display());
        let text = self.extractor.extract(&document)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract an in-memory document, such as pasted text
    pub fn extract_document(&self, document: &Document) -> Result<String> {
        self.extractor.extract(document)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
