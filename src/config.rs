//! Configuration management for the resume scorer

use crate::error::{Result, ResumeScorerError};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Weight tolerance for the sum-to-one invariant; absorbs f64
/// representation error on values like 0.3 + 0.4 + 0.3.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Explicit, injectable configuration for [`crate::ScoreEngine`].
///
/// The engine holds no global state: everything it needs arrives through
/// this bundle, so tests can fabricate arbitrary stopword lists, taxonomies,
/// weights, and band tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub stopwords: BTreeSet<String>,
    pub skill_taxonomy: BTreeSet<String>,
    pub weights: ScoringWeights,
    pub bands: Vec<RecommendationBand>,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub keyword: f64,
    pub semantic: f64,
    pub skills: f64,
}

/// One recommendation band: applies to any overall score at or above
/// `min_score` not claimed by a higher band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationBand {
    pub min_score: f64,
    pub label: String,
}

impl ScoringConfig {
    /// Check the configuration contract. Violations are fatal: an engine
    /// must not be constructed from a config that fails here.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("keyword", self.weights.keyword),
            ("semantic", self.weights.semantic),
            ("skills", self.weights.skills),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ResumeScorerError::Configuration(format!(
                    "{} weight {} is outside [0, 1]",
                    name, value
                )));
            }
        }

        let sum = self.weights.keyword + self.weights.semantic + self.weights.skills;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ResumeScorerError::Configuration(format!(
                "scoring weights must sum to 1.0, got {}",
                sum
            )));
        }

        if self.bands.is_empty() {
            return Err(ResumeScorerError::Configuration(
                "recommendation band table is empty".to_string(),
            ));
        }

        for window in self.bands.windows(2) {
            if window[1].min_score >= window[0].min_score {
                return Err(ResumeScorerError::Configuration(format!(
                    "band thresholds must be strictly decreasing: {} followed by {}",
                    window[0].min_score, window[1].min_score
                )));
            }
        }

        for band in &self.bands {
            if !(0.0..=100.0).contains(&band.min_score) {
                return Err(ResumeScorerError::Configuration(format!(
                    "band threshold {} is outside [0, 100]",
                    band.min_score
                )));
            }
        }

        // A final threshold above zero would leave low scores unmapped
        if self.bands[self.bands.len() - 1].min_score != 0.0 {
            return Err(ResumeScorerError::Configuration(
                "last recommendation band must start at 0".to_string(),
            ));
        }

        if self.max_features == 0 {
            return Err(ResumeScorerError::Configuration(
                "max_features must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
            skill_taxonomy: default_skill_taxonomy(),
            weights: ScoringWeights {
                keyword: 0.3,
                semantic: 0.4,
                skills: 0.3,
            },
            bands: default_bands(),
            max_features: default_max_features(),
        }
    }
}

/// Readiness of the externally loaded scoring resources. A configured file
/// that fails to load degrades to an empty set instead of failing startup;
/// this records that it happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub stopwords_ready: bool,
    pub taxonomy_ready: bool,
}

impl ResourceStatus {
    pub fn is_ready(&self) -> bool {
        self.stopwords_ready && self.taxonomy_ready
    }
}

/// Application-level configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub resources: ResourceConfig,
    pub weights: ScoringWeights,
    #[serde(default = "default_bands")]
    pub bands: Vec<RecommendationBand>,
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    pub output: OutputConfig,
}

/// Optional external resource files, one entry per line, `#` comments
/// allowed. Absent paths fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub stopwords_file: Option<PathBuf>,
    pub taxonomy_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: ResourceConfig::default(),
            weights: ScoringWeights {
                keyword: 0.3,
                semantic: 0.4,
                skills: 0.3,
            },
            bands: default_bands(),
            max_features: default_max_features(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeScorerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeScorerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    /// Assemble the injectable scoring bundle.
    ///
    /// Resource files degrade gracefully: a configured file that cannot be
    /// read yields an empty set and a cleared readiness flag rather than an
    /// error, so startup never fails on a missing word list.
    pub fn scoring_config(&self) -> (ScoringConfig, ResourceStatus) {
        let (stopwords, stopwords_ready) = match &self.resources.stopwords_file {
            Some(path) => match load_word_list(path) {
                Ok(words) => (words, true),
                Err(e) => {
                    warn!("Failed to load stopwords from {}: {}", path.display(), e);
                    (BTreeSet::new(), false)
                }
            },
            None => (default_stopwords(), true),
        };

        let (skill_taxonomy, taxonomy_ready) = match &self.resources.taxonomy_file {
            Some(path) => match load_word_list(path) {
                Ok(entries) => (entries, true),
                Err(e) => {
                    warn!("Failed to load taxonomy from {}: {}", path.display(), e);
                    (BTreeSet::new(), false)
                }
            },
            None => (default_skill_taxonomy(), true),
        };

        let scoring = ScoringConfig {
            stopwords,
            skill_taxonomy,
            weights: self.weights,
            bands: self.bands.clone(),
            max_features: self.max_features,
        };

        let status = ResourceStatus {
            stopwords_ready,
            taxonomy_ready,
        };

        (scoring, status)
    }
}

/// Read a word-list file: one entry per line, trimmed and lowercased,
/// blank lines and `#` comments skipped.
pub fn load_word_list(path: &Path) -> Result<BTreeSet<String>> {
    let content = std::fs::read_to_string(path)?;

    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_lowercase())
        .collect())
}

fn default_max_features() -> usize {
    crate::processing::tfidf::DEFAULT_MAX_FEATURES
}

/// Default recommendation bands, descending, lower bounds inclusive.
pub fn default_bands() -> Vec<RecommendationBand> {
    let table = [
        (75.0, "Strong Match - Highly Recommended"),
        (60.0, "Good Match - Recommended"),
        (45.0, "Moderate Match - Consider for Interview"),
        (30.0, "Weak Match - Further Review Needed"),
        (0.0, "Poor Match - Not Recommended"),
    ];

    table
        .iter()
        .map(|(min_score, label)| RecommendationBand {
            min_score: *min_score,
            label: label.to_string(),
        })
        .collect()
}

/// Common English stopwords used for keyword extraction and TF-IDF
/// vocabulary construction.
pub fn default_stopwords() -> BTreeSet<String> {
    let words = [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
        "just", "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once",
        "only", "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so",
        "some", "such", "than", "that", "the", "their", "theirs", "them", "then", "there",
        "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "very",
        "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
        "will", "with", "would", "you", "your", "yours",
    ];

    words.iter().map(|s| s.to_string()).collect()
}

/// Default skill taxonomy: languages, ML/data tools, web frameworks,
/// databases, cloud/devops, and general professional tools.
pub fn default_skill_taxonomy() -> BTreeSet<String> {
    let skills = [
        // Programming languages
        "python",
        "java",
        "javascript",
        "c++",
        "c#",
        "ruby",
        "php",
        "swift",
        "kotlin",
        "go",
        "rust",
        "typescript",
        "matlab",
        "scala",
        "perl",
        // Data science / ML
        "machine learning",
        "deep learning",
        "nlp",
        "computer vision",
        "tensorflow",
        "pytorch",
        "keras",
        "scikit-learn",
        "sklearn",
        "pandas",
        "numpy",
        "matplotlib",
        "seaborn",
        "data analysis",
        "data visualization",
        "statistics",
        "sql",
        // Web development
        "react",
        "angular",
        "vue",
        "node.js",
        "express",
        "django",
        "flask",
        "fastapi",
        "html",
        "css",
        "bootstrap",
        "tailwind",
        "jquery",
        "rest api",
        "graphql",
        // Databases
        "mysql",
        "postgresql",
        "mongodb",
        "redis",
        "cassandra",
        "oracle",
        "sql server",
        // Cloud & DevOps
        "aws",
        "azure",
        "gcp",
        "docker",
        "kubernetes",
        "jenkins",
        "ci/cd",
        "git",
        "terraform",
        "ansible",
        // General professional tools
        "agile",
        "scrum",
        "jira",
        "excel",
        "tableau",
        "power bi",
        "spark",
        "hadoop",
    ];

    skills.iter().map(|s| s.to_string()).collect()
}
