//! Text extraction from various file formats

use crate::error::{Result, ResumeScorerError};
use pulldown_cmark::{html, Parser};
use std::fs;
use std::path::Path;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeScorerError::DocumentExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        ensure_nonempty(text, path)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)?;
        ensure_nonempty(content, path)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        ensure_nonempty(self.html_to_text(&html_output), path)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let re = regex::Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// A document that decodes but contains no text is unusable for scoring.
fn ensure_nonempty(text: String, path: &Path) -> Result<String> {
    if text.trim().is_empty() {
        return Err(ResumeScorerError::DocumentExtraction(format!(
            "No text found in '{}'",
            path.display()
        )));
    }
    Ok(text)
}
