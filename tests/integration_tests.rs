//! Integration tests for the resume scorer

use resume_scorer::config::{Config, ScoringConfig};
use resume_scorer::input::manager::InputManager;
use resume_scorer::processing::analyzer::ScoreEngine;
use resume_scorer::ResumeScorerError;
use std::io::Write;
use std::path::{Path, PathBuf};

#[test]
fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path);
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Python"));
    assert!(text.contains("Docker"));
}

#[test]
fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path);
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Python"));
    assert!(text.contains("Docker"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[test]
fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    // First extraction
    let text1 = manager.extract_text(path).unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = manager.extract_text(path).unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[test]
fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path);
    assert!(matches!(
        result,
        Err(ResumeScorerError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path);
    assert!(result.is_err());
}

#[test]
fn test_whitespace_only_document_is_an_extraction_error() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "   \n\t\n  ").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(file.path());

    assert!(matches!(
        result,
        Err(ResumeScorerError::DocumentExtraction(_))
    ));
}

#[test]
fn test_end_to_end_scoring_from_fixtures() {
    let mut manager = InputManager::new();
    let resume_text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .unwrap();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .unwrap();

    let engine = ScoreEngine::new(ScoringConfig::default()).unwrap();
    let report = engine.score(&resume_text, &job_text);

    assert!(report.overall_score > 0.0 && report.overall_score <= 100.0);

    let skills = &report.breakdown.skills_matching;
    assert!(skills.matched.iter().any(|s| s == "python"));
    assert!(skills.matched.iter().any(|s| s == "docker"));
    assert!(skills.matched.iter().any(|s| s == "postgresql"));
    assert!(skills.missing.iter().any(|s| s == "kubernetes"));

    assert!(report.breakdown.semantic_similarity > 0.0);
    assert!(!report.recommendation.is_empty());
}

#[test]
fn test_markdown_and_plain_text_resumes_score_identically() {
    let mut manager = InputManager::new();
    let txt = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .unwrap();
    let md = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .unwrap();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .unwrap();

    let engine = ScoreEngine::new(ScoringConfig::default()).unwrap();
    let from_txt = engine.score(&txt, &job_text);
    let from_md = engine.score(&md, &job_text);

    // Same content through different formats lands in the same band with
    // the same skill coverage
    assert_eq!(
        from_txt.breakdown.skills_matching,
        from_md.breakdown.skills_matching
    );
    assert_eq!(from_txt.recommendation, from_md.recommendation);
}

#[test]
fn test_degraded_resources_still_score() {
    let mut config = Config::default();
    config.resources.stopwords_file = Some(PathBuf::from("/nonexistent/stopwords.txt"));

    let (scoring_config, status) = config.scoring_config();
    assert!(!status.is_ready());

    let engine = ScoreEngine::new(scoring_config).unwrap();
    let report = engine.score(
        "Python developer with Docker experience",
        "Python developer wanted",
    );

    assert!(report.overall_score > 0.0);
}

#[test]
fn test_custom_taxonomy_file_drives_skill_matching() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# synthetic taxonomy").unwrap();
    writeln!(file, "fortran").unwrap();
    writeln!(file, "pascal").unwrap();

    let mut config = Config::default();
    config.resources.taxonomy_file = Some(file.path().to_path_buf());

    let (scoring_config, status) = config.scoring_config();
    assert!(status.is_ready());
    assert_eq!(scoring_config.skill_taxonomy.len(), 2);

    let engine = ScoreEngine::new(scoring_config).unwrap();
    let report = engine.score(
        "Veteran FORTRAN maintainer",
        "Seeking Fortran and Pascal experience",
    );

    let skills = &report.breakdown.skills_matching;
    assert_eq!(skills.matched, vec!["fortran"]);
    assert_eq!(skills.missing, vec!["pascal"]);
    assert_eq!(skills.score, 50.0);
}
