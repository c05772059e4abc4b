//! Text normalization and keyword extraction

use regex::Regex;
use std::collections::BTreeSet;

/// Normalizes raw document text and extracts keyword sets against an
/// injected stopword list.
pub struct TextProcessor {
    stop_words: BTreeSet<String>,
    email_regex: Regex,
    url_regex: Regex,
    phone_regex: Regex,
    special_chars_regex: Regex,
}

impl TextProcessor {
    pub fn new(stop_words: BTreeSet<String>) -> Self {
        let email_regex = Regex::new(r"\S+@\S+").expect("Invalid email regex");

        let url_regex = Regex::new(r"http\S+|www\.\S+").expect("Invalid URL regex");

        // Exactly 10 consecutive digits, or 3-3-4 groups separated by
        // '-', '.' or a single space.
        let phone_regex = Regex::new(r"\b\d{10}\b|\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b")
            .expect("Invalid phone regex");

        let special_chars_regex =
            Regex::new(r"[^a-z0-9\s]").expect("Invalid special character regex");

        Self {
            stop_words,
            email_regex,
            url_regex,
            phone_regex,
            special_chars_regex,
        }
    }

    /// Normalize text for keyword and vector analysis.
    ///
    /// Step order matters: contact details are stripped while their
    /// punctuation is still intact, then everything outside `[a-z0-9\s]`
    /// collapses to spaces.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        let cleaned = self.email_regex.replace_all(&lowered, "");
        let cleaned = self.url_regex.replace_all(&cleaned, "");
        let cleaned = self.phone_regex.replace_all(&cleaned, "");
        let cleaned = self.special_chars_regex.replace_all(&cleaned, " ");

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Extract the set of significant tokens from text: normalized,
    /// whitespace-split, stopwords removed, length > 2.
    pub fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        self.normalize(text)
            .split_whitespace()
            .filter(|word| word.len() > 2 && !self.stop_words.contains(*word))
            .map(|word| word.to_string())
            .collect()
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn stop_words(&self) -> &BTreeSet<String> {
        &self.stop_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn processor() -> TextProcessor {
        TextProcessor::new(config::default_stopwords())
    }

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        let processor = processor();
        let normalized = processor.normalize("Senior Rust Developer (Backend)!");

        assert_eq!(normalized, "senior rust developer backend");
    }

    #[test]
    fn test_normalize_strips_contact_details() {
        let processor = processor();
        let text = "Reach me at john.doe@example.com or visit https://johndoe.dev \
                    or www.johndoe.dev or call 555-123-4567.";

        let normalized = processor.normalize(text);

        assert!(!normalized.contains("example"));
        assert!(!normalized.contains("johndoe"));
        assert!(!normalized.contains("555"));
        assert!(!normalized.contains("4567"));
    }

    #[test]
    fn test_normalize_strips_ten_digit_phone() {
        let processor = processor();

        let normalized = processor.normalize("call 5551234567 today");
        assert_eq!(normalized, "call today");

        let normalized = processor.normalize("call 555.123.4567 today");
        assert_eq!(normalized, "call today");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let processor = processor();
        let normalized = processor.normalize("  too   much\t\twhitespace\n\nhere  ");

        assert_eq!(normalized, "too much whitespace here");
    }

    #[test]
    fn test_normalize_empty_input() {
        let processor = processor();
        assert_eq!(processor.normalize(""), "");
    }

    #[test]
    fn test_normalize_only_characters_in_range() {
        let processor = processor();
        let normalized = processor.normalize("C++ & C# developer, 5+ years!");

        assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '));
    }

    #[test]
    fn test_extract_keywords_collects_all_qualifying_tokens() {
        let processor = processor();
        let keywords =
            processor.extract_keywords("Experienced Python developer with Docker skills");

        assert!(keywords.contains("experienced"));
        assert!(keywords.contains("python"));
        assert!(keywords.contains("developer"));
        assert!(keywords.contains("docker"));
        assert!(keywords.contains("skills"));
    }

    #[test]
    fn test_extract_keywords_filters_stopwords_and_short_tokens() {
        let processor = processor();
        let keywords = processor.extract_keywords("to be an expert in ML and AI");

        assert!(!keywords.contains("to"));
        assert!(!keywords.contains("be"));
        assert!(!keywords.contains("an"));
        assert!(!keywords.contains("in"));
        // Length filter drops two-character tokens regardless of meaning
        assert!(!keywords.contains("ml"));
        assert!(!keywords.contains("ai"));
        assert!(keywords.contains("expert"));
    }

    #[test]
    fn test_extract_keywords_empty_result_is_valid() {
        let processor = processor();
        let keywords = processor.extract_keywords("to a of it");

        assert!(keywords.is_empty());
    }
}
