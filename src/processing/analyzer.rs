//! Scoring engine combining keyword, semantic, and skill signals

use crate::config::{RecommendationBand, ScoringConfig, ScoringWeights};
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::text_processor::TextProcessor;
use crate::processing::tfidf::{cosine_similarity, TfidfVectorizer};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::Result;

/// Stateless scoring engine. Every call to [`ScoreEngine::score`] is a pure
/// computation over its inputs and the injected configuration, so a single
/// engine is safe to share across threads.
pub struct ScoreEngine {
    text_processor: TextProcessor,
    skill_matcher: SkillMatcher,
    vectorizer: TfidfVectorizer,
    weights: ScoringWeights,
    bands: Vec<RecommendationBand>,
}

/// One coverage signal: percentage score with the matched and missing
/// reference entries, both sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_matching: ScoreComponent,
    pub semantic_similarity: f64,
    pub skills_matching: ScoreComponent,
}

/// Composite result for one resume / job-description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub overall_score: f64,
    pub breakdown: ScoreBreakdown,
    pub recommendation: String,
}

impl ScoreEngine {
    /// Build an engine from explicit configuration.
    ///
    /// The configuration contract (weights summing to 1.0, a well-formed
    /// band table) is checked here, once, never per call.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;

        let ScoringConfig {
            stopwords,
            skill_taxonomy,
            weights,
            bands,
            max_features,
        } = config;

        let skill_matcher = SkillMatcher::new(&skill_taxonomy)?;
        let vectorizer = TfidfVectorizer::new(stopwords.clone(), max_features);
        let text_processor = TextProcessor::new(stopwords);

        Ok(Self {
            text_processor,
            skill_matcher,
            vectorizer,
            weights,
            bands,
        })
    }

    /// Score a resume against a job description.
    pub fn score(&self, resume_text: &str, jd_text: &str) -> MatchReport {
        let keyword_matching = self.keyword_matching_score(resume_text, jd_text);
        let semantic_similarity = self.semantic_similarity_score(resume_text, jd_text);
        let skills_matching = self.skills_matching_score(resume_text, jd_text);

        let overall_score = round2(
            keyword_matching.score * self.weights.keyword
                + semantic_similarity * self.weights.semantic
                + skills_matching.score * self.weights.skills,
        );

        let recommendation = self.recommendation_for(overall_score);

        MatchReport {
            overall_score,
            breakdown: ScoreBreakdown {
                keyword_matching,
                semantic_similarity,
                skills_matching,
            },
            recommendation,
        }
    }

    /// Keyword coverage: share of job-description keywords present in the
    /// resume.
    fn keyword_matching_score(&self, resume_text: &str, jd_text: &str) -> ScoreComponent {
        let resume_keywords = self.text_processor.extract_keywords(resume_text);
        let jd_keywords = self.text_processor.extract_keywords(jd_text);

        coverage_component(&resume_keywords, &jd_keywords)
    }

    /// Cosine similarity of the TF-IDF vectors of both documents, scaled
    /// to 0-100. Vectorization is best-effort: any failure degrades to 0.0
    /// rather than failing the request.
    fn semantic_similarity_score(&self, resume_text: &str, jd_text: &str) -> f64 {
        let resume_clean = self.text_processor.normalize(resume_text);
        let jd_clean = self.text_processor.normalize(jd_text);

        match self
            .vectorizer
            .fit_transform(&[resume_clean.as_str(), jd_clean.as_str()])
        {
            Ok(vectors) => {
                let similarity = cosine_similarity(&vectors[0], &vectors[1]);
                round2(similarity * 100.0)
            }
            Err(e) => {
                warn!("Semantic similarity degraded to 0.0: {}", e);
                0.0
            }
        }
    }

    /// Skill taxonomy coverage: share of job-description skills present in
    /// the resume.
    fn skills_matching_score(&self, resume_text: &str, jd_text: &str) -> ScoreComponent {
        let resume_skills = self.skill_matcher.extract_skills(resume_text);
        let jd_skills = self.skill_matcher.extract_skills(jd_text);

        coverage_component(&resume_skills, &jd_skills)
    }

    /// Map an overall score to its recommendation band. Bands are ordered
    /// by descending threshold and lower bounds are inclusive.
    pub fn recommendation_for(&self, score: f64) -> String {
        self.bands
            .iter()
            .find(|band| score >= band.min_score)
            .or_else(|| self.bands.last())
            .map(|band| band.label.clone())
            .unwrap_or_default()
    }

    pub fn taxonomy_size(&self) -> usize {
        self.skill_matcher.taxonomy_size()
    }

    pub fn stop_word_count(&self) -> usize {
        self.text_processor.stop_word_count()
    }
}

/// Coverage of `reference` by `candidate`. An empty reference set scores 0
/// with empty matched/missing lists.
fn coverage_component(
    candidate: &BTreeSet<String>,
    reference: &BTreeSet<String>,
) -> ScoreComponent {
    if reference.is_empty() {
        return ScoreComponent {
            score: 0.0,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let matched: Vec<String> = reference.intersection(candidate).cloned().collect();
    let missing: Vec<String> = reference.difference(candidate).cloned().collect();

    let score = round2(matched.len() as f64 / reference.len() as f64 * 100.0);

    ScoreComponent {
        score,
        matched,
        missing,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
