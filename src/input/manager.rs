//! Reads résumé and job description files, keyed by their canonical path

use crate::error::{CvError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Default)]
pub struct InputManager {
    documents: HashMap<PathBuf, String>,
    bypass_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.bypass_cache = !enable;
        self
    }

    /// Decoded text of a `.txt` or `.md` file.
    ///
    /// A file reached through several relative paths is read from disk once.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let key = canonical(path).await?;
        if let Some(text) = self.documents.get(&key) {
            debug!("{} already read", key.display());
            return Ok(text.clone());
        }

        let file_type = FileType::of(path);
        let text = read_as(file_type, path).await?;
        info!(
            "Read {} as {} ({} lines)",
            path.display(),
            file_type,
            text.lines().count()
        );

        if !self.bypass_cache {
            self.documents.insert(key, text.clone());
        }
        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.documents.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.documents.len()
    }
}

async fn canonical(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path).await {
        Ok(key) => Ok(key),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CvError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        ))),
        Err(e) => Err(e.into()),
    }
}

async fn read_as(file_type: FileType, path: &Path) -> Result<String> {
    match file_type {
        FileType::Text => PlainTextExtractor.extract(path).await,
        FileType::Markdown => MarkdownExtractor.extract(path).await,
        FileType::Unknown => Err(CvError::UnsupportedFormat(format!(
            "{}: résumés and job descriptions are read from .txt or .md files",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_markdown_front_matter_only_stripped_for_md() {
        let dir = TempDir::new().unwrap();
        let content = "---\nlang: fr\n---\n# Léa Petit\n";
        std::fs::write(dir.path().join("cv.md"), content).unwrap();
        std::fs::write(dir.path().join("cv.txt"), content).unwrap();

        let mut manager = InputManager::new();
        let markdown = manager.extract_text(&dir.path().join("cv.md")).await.unwrap();
        let plain = manager.extract_text(&dir.path().join("cv.txt")).await.unwrap();

        assert_eq!(markdown, "# Léa Petit\n");
        assert_eq!(plain, content);
        assert_eq!(manager.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_same_file_through_two_paths_is_cached_once() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("jobs")).unwrap();
        std::fs::write(dir.path().join("jobs/backend.txt"), "Rust developer").unwrap();

        let mut manager = InputManager::new();
        let direct = manager.extract_text(&dir.path().join("jobs/backend.txt")).await.unwrap();
        let detour = manager
            .extract_text(&dir.path().join("jobs/../jobs/./backend.txt"))
            .await
            .unwrap();

        assert_eq!(direct, detour);
        assert_eq!(manager.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_missing_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README"), "text").unwrap();

        let result = InputManager::new().extract_text(&dir.path().join("README")).await;
        assert!(matches!(result, Err(CvError::UnsupportedFormat(_))));
    }
}
