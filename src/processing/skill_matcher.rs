//! Skill taxonomy matching

use crate::error::{Result, ResumeScorerError};
use aho_corasick::AhoCorasick;
use std::collections::BTreeSet;

/// Matches documents against a fixed skill taxonomy by case-insensitive
/// substring search.
pub struct SkillMatcher {
    matcher: AhoCorasick,
    taxonomy: Vec<String>,
}

impl SkillMatcher {
    /// Build a matcher over a skill taxonomy.
    ///
    /// Matching runs on raw text rather than normalized text so punctuated
    /// entries like "c++" or "scikit-learn" stay matchable.
    pub fn new(taxonomy: &BTreeSet<String>) -> Result<Self> {
        let taxonomy: Vec<String> = taxonomy.iter().map(|s| s.to_lowercase()).collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&taxonomy)
            .map_err(|e| {
                ResumeScorerError::Configuration(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self { matcher, taxonomy })
    }

    /// Collect every taxonomy entry that occurs somewhere in the text.
    ///
    /// Search is unanchored and overlapping: an entry matches even inside a
    /// larger token, and entries that are substrings of other entries are
    /// all reported. Recall over precision.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.matcher
            .find_overlapping_iter(text)
            .map(|mat| self.taxonomy[mat.pattern().as_usize()].clone())
            .collect()
    }

    pub fn taxonomy_size(&self) -> usize {
        self.taxonomy.len()
    }

    pub fn taxonomy(&self) -> &[String] {
        &self.taxonomy
    }
}
