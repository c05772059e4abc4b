//! TF-IDF vectorization and cosine similarity

use crate::error::{Result, ResumeScorerError};
use std::collections::{BTreeMap, BTreeSet};
use unicode_segmentation::UnicodeSegmentation;

/// Term-weighted vector builder over a two-document corpus.
///
/// Vocabulary is unigrams plus bigrams with stopwords removed, capped at
/// `max_features` terms by corpus frequency. Term weights are raw counts
/// scaled by smoothed inverse document frequency, L2-normalized.
pub struct TfidfVectorizer {
    stop_words: BTreeSet<String>,
    max_features: usize,
}

pub const DEFAULT_MAX_FEATURES: usize = 1000;

impl TfidfVectorizer {
    pub fn new(stop_words: BTreeSet<String>, max_features: usize) -> Self {
        Self {
            stop_words,
            max_features,
        }
    }

    /// Build TF-IDF vectors for the given documents over a shared
    /// vocabulary. Errors when no document contributes any term.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<Vec<f64>>> {
        let token_streams: Vec<Vec<String>> =
            documents.iter().map(|doc| self.tokenize(doc)).collect();

        let term_streams: Vec<Vec<String>> = token_streams
            .iter()
            .map(|tokens| Self::ngrams(tokens))
            .collect();

        let vocabulary = self.build_vocabulary(&term_streams);
        if vocabulary.is_empty() {
            return Err(ResumeScorerError::Vectorization(
                "empty vocabulary: documents contain no usable terms".to_string(),
            ));
        }

        let document_count = documents.len() as f64;
        let document_frequency = Self::document_frequency(&term_streams, &vocabulary);

        let vectors = term_streams
            .iter()
            .map(|terms| {
                let mut counts: BTreeMap<&str, f64> = BTreeMap::new();
                for term in terms {
                    if vocabulary.contains_key(term.as_str()) {
                        *counts.entry(term.as_str()).or_insert(0.0) += 1.0;
                    }
                }

                let mut vector = vec![0.0; vocabulary.len()];
                for (term, count) in counts {
                    let index = vocabulary[term];
                    let df = document_frequency[index] as f64;
                    // Smoothed IDF keeps terms present in every document
                    // from zeroing out in a two-document corpus.
                    let idf = ((1.0 + document_count) / (1.0 + df)).ln() + 1.0;
                    vector[index] = count * idf;
                }

                l2_normalize(&mut vector);
                vector
            })
            .collect();

        Ok(vectors)
    }

    /// Split normalized text into lowercase word tokens of length >= 2,
    /// stopwords removed.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| word.to_lowercase())
            .filter(|word| word.chars().count() >= 2 && !self.stop_words.contains(word))
            .collect()
    }

    /// Unigrams followed by bigrams over the filtered token stream.
    fn ngrams(tokens: &[String]) -> Vec<String> {
        let mut terms = tokens.to_vec();
        for pair in tokens.windows(2) {
            terms.push(format!("{} {}", pair[0], pair[1]));
        }
        terms
    }

    /// Select the vocabulary, keeping the `max_features` most frequent
    /// terms across the corpus. Ties break lexicographically so the
    /// vocabulary, and therefore every score, is deterministic.
    fn build_vocabulary(&self, term_streams: &[Vec<String>]) -> BTreeMap<String, usize> {
        let mut corpus_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in term_streams {
            for term in terms {
                *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        ranked
            .into_iter()
            .map(|(term, _)| term.to_string())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect()
    }

    /// Number of documents containing each vocabulary term.
    fn document_frequency(
        term_streams: &[Vec<String>],
        vocabulary: &BTreeMap<String, usize>,
    ) -> Vec<usize> {
        let mut df = vec![0usize; vocabulary.len()];
        for terms in term_streams {
            let unique: BTreeSet<&str> = terms.iter().map(|t| t.as_str()).collect();
            for term in unique {
                if let Some(&index) = vocabulary.get(term) {
                    df[index] += 1;
                }
            }
        }
        df
    }
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity between two vectors, 0.0 when either has zero
/// magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::new(config::default_stopwords(), DEFAULT_MAX_FEATURES)
    }

    #[test]
    fn test_identical_documents_have_unit_similarity() {
        let vectorizer = vectorizer();
        let text = "rust developer building distributed storage systems";

        let vectors = vectorizer.fit_transform(&[text, text]).unwrap();
        let similarity = cosine_similarity(&vectors[0], &vectors[1]);

        assert!((similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_have_zero_similarity() {
        let vectorizer = vectorizer();

        let vectors = vectorizer
            .fit_transform(&["alpha bravo charlie", "delta echo foxtrot"])
            .unwrap();
        let similarity = cosine_similarity(&vectors[0], &vectors[1]);

        assert_eq!(similarity, 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let vectorizer = vectorizer();

        let vectors = vectorizer
            .fit_transform(&[
                "python developer docker kubernetes",
                "python developer terraform ansible",
            ])
            .unwrap();
        let similarity = cosine_similarity(&vectors[0], &vectors[1]);

        assert!(similarity > 0.0);
        assert!(similarity < 1.0);
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let vectorizer = vectorizer();

        let result = vectorizer.fit_transform(&["", ""]);
        assert!(matches!(result, Err(ResumeScorerError::Vectorization(_))));

        // Stopwords and single-character tokens contribute nothing
        let result = vectorizer.fit_transform(&["the a an", "x y z"]);
        assert!(matches!(result, Err(ResumeScorerError::Vectorization(_))));
    }

    #[test]
    fn test_bigrams_enter_the_vocabulary() {
        let vectorizer = TfidfVectorizer::new(BTreeSet::new(), DEFAULT_MAX_FEATURES);

        // Shared bigram "machine learning" gives these documents more in
        // common than the unigrams alone would.
        let with_bigrams = vectorizer
            .fit_transform(&["machine learning engineer", "machine learning researcher"])
            .unwrap();
        let similarity = cosine_similarity(&with_bigrams[0], &with_bigrams[1]);

        assert!(similarity > 0.0);
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let vectorizer = TfidfVectorizer::new(BTreeSet::new(), 3);

        let vectors = vectorizer
            .fit_transform(&["one two three four five", "one two three"])
            .unwrap();

        assert_eq!(vectors[0].len(), 3);
        assert_eq!(vectors[1].len(), 3);
    }

    #[test]
    fn test_cosine_zero_magnitude_guard() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_vectors_are_deterministic() {
        let vectorizer = vectorizer();
        let docs = ["rust systems engineer", "senior rust engineer"];

        let first = vectorizer.fit_transform(&docs).unwrap();
        let second = vectorizer.fit_transform(&docs).unwrap();

        assert_eq!(first, second);
    }
}
