//! Text extraction from résumé and job description files
//!
//! Markdown is kept as markdown: its headings and list markers are what the
//! segmenter works from.

use crate::error::{CvError, Result};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        decode(path, bytes)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let text = decode(path, bytes)?;
        Ok(strip_front_matter(&text).to_string())
    }
}

/// UTF-8 text with a leading BOM dropped and line endings unified.
fn decode(path: &Path, bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes)
        .map_err(|e| CvError::InvalidInput(format!("'{}' is not valid UTF-8: {}", path.display(), e)))?;

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Drop a leading `---` delimited metadata block.
fn strip_front_matter(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("---\n") else {
        return text;
    };
    match rest.find("\n---\n") {
        Some(end) => &rest[end + "\n---\n".len()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_crlf_and_bom_are_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cv.txt");
        std::fs::write(&path, "\u{feff}Jean\r\nDupont\r\n").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Jean\nDupont\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cv.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let result = PlainTextExtractor.extract(&path).await;
        assert!(matches!(result, Err(CvError::InvalidInput(_))));
    }

    #[test]
    fn test_front_matter() {
        assert_eq!(strip_front_matter("---\nlang: fr\n---\n# CV\n"), "# CV\n");
        assert_eq!(strip_front_matter("---\nunterminated\n"), "---\nunterminated\n");
        assert_eq!(strip_front_matter("# CV\n---\n"), "# CV\n---\n");
    }
}
