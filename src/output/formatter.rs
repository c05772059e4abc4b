//! Output formatters with multiple format support

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScoreReport;
use crate::processing::analyzer::ScoreComponent;
use colored::Colorize;
use std::fmt::Write;

/// Trait for rendering score reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and rich presentation
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter;

/// Coordinates the individual formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn paint_score(&self, value: f64, text: String) -> String {
        if !self.use_colors {
            return text;
        }

        let colored_text = if value >= 75.0 {
            text.green().bold()
        } else if value >= 60.0 {
            text.cyan().bold()
        } else if value >= 45.0 {
            text.yellow().bold()
        } else if value >= 30.0 {
            text.yellow()
        } else {
            text.red().bold()
        };

        colored_text.to_string()
    }

    fn push_component(
        &self,
        out: &mut String,
        title: &str,
        component: &ScoreComponent,
        matched_label: &str,
        missing_label: &str,
    ) {
        let _ = writeln!(
            out,
            "  • {}: {}",
            title,
            self.paint_score(component.score, format!("{:.2}%", component.score))
        );

        if self.detailed {
            if !component.matched.is_empty() {
                let _ = writeln!(
                    out,
                    "      {}: {}",
                    matched_label,
                    preview_list(&component.matched, 15)
                );
            }
            if !component.missing.is_empty() {
                let _ = writeln!(
                    out,
                    "      {}: {}",
                    missing_label,
                    preview_list(&component.missing, 15)
                );
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let result = &report.result;

        let _ = writeln!(out, "📊 Match Score Report");
        let _ = writeln!(out, "📄 Resume: {}", report.metadata.resume_path);
        let _ = writeln!(out, "💼 Job Description: {}", report.metadata.job_path);
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "Overall Score: {}",
            self.paint_score(result.overall_score, format!("{:.2}%", result.overall_score))
        );
        let _ = writeln!(
            out,
            "Recommendation: {}",
            self.paint_score(result.overall_score, result.recommendation.clone())
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "📈 Component Scores:");
        self.push_component(
            &mut out,
            "Keyword Matching",
            &result.breakdown.keyword_matching,
            "Matched keywords",
            "Missing keywords",
        );
        let _ = writeln!(
            out,
            "  • Semantic Similarity: {}",
            self.paint_score(
                result.breakdown.semantic_similarity,
                format!("{:.2}%", result.breakdown.semantic_similarity)
            )
        );
        self.push_component(
            &mut out,
            "Skills Matching",
            &result.breakdown.skills_matching,
            "Matched skills",
            "Missing skills",
        );

        if self.detailed {
            let engine = &report.metadata.engine;
            let _ = writeln!(out);
            let _ = writeln!(out, "⚙️  Engine:");
            let _ = writeln!(out, "  • Skill taxonomy: {} entries", engine.taxonomy_size);
            let _ = writeln!(out, "  • Stopwords: {} entries", engine.stopword_count);
            if !engine.resources.is_ready() {
                let _ = writeln!(
                    out,
                    "  • ⚠️  Degraded: one or more resource files failed to load"
                );
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let result = &report.result;

        let _ = writeln!(out, "# Match Score Report");
        let _ = writeln!(out);
        let _ = writeln!(out, "- **Resume**: `{}`", report.metadata.resume_path);
        let _ = writeln!(out, "- **Job Description**: `{}`", report.metadata.job_path);
        let _ = writeln!(
            out,
            "- **Generated**: {}",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "## Result");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Signal | Score |");
        let _ = writeln!(out, "|---|---|");
        let _ = writeln!(
            out,
            "| Keyword Matching | {:.2}% |",
            result.breakdown.keyword_matching.score
        );
        let _ = writeln!(
            out,
            "| Semantic Similarity | {:.2}% |",
            result.breakdown.semantic_similarity
        );
        let _ = writeln!(
            out,
            "| Skills Matching | {:.2}% |",
            result.breakdown.skills_matching.score
        );
        let _ = writeln!(out, "| **Overall** | **{:.2}%** |", result.overall_score);
        let _ = writeln!(out);
        let _ = writeln!(out, "**Recommendation**: {}", result.recommendation);

        let skills = &result.breakdown.skills_matching;
        if !skills.matched.is_empty() || !skills.missing.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Skills");
            let _ = writeln!(out);
            if !skills.matched.is_empty() {
                let _ = writeln!(out, "- Matched: {}", skills.matched.join(", "));
            }
            if !skills.missing.is_empty() {
                let _ = writeln!(out, "- Missing: {}", skills.missing.join(", "));
            }
        }

        let keywords = &result.breakdown.keyword_matching;
        if !keywords.missing.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Missing Keywords");
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", preview_list(&keywords.missing, 25));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

/// First `limit` entries joined with commas, with a trailing count when
/// truncated.
fn preview_list(entries: &[String], limit: usize) -> String {
    if entries.len() <= limit {
        entries.join(", ")
    } else {
        format!(
            "{} … and {} more",
            entries[..limit].join(", "),
            entries.len() - limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResourceStatus, ScoringConfig};
    use crate::output::report::EngineInfo;
    use crate::processing::analyzer::ScoreEngine;

    fn sample_report() -> ScoreReport {
        let engine = ScoreEngine::new(ScoringConfig::default()).unwrap();
        let result = engine.score(
            "Experienced Python developer with AWS and Docker skills",
            "Looking for a Python developer familiar with Docker and Kubernetes",
        );

        ScoreReport::new(
            result,
            "resume.txt".to_string(),
            "job.txt".to_string(),
            EngineInfo {
                taxonomy_size: engine.taxonomy_size(),
                stopword_count: engine.stop_word_count(),
                resources: ResourceStatus {
                    stopwords_ready: true,
                    taxonomy_ready: true,
                },
            },
        )
    }

    #[test]
    fn test_console_output_contains_scores() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("Overall Score"));
        assert!(output.contains("Recommendation"));
        assert!(output.contains("Keyword Matching"));
        assert!(output.contains("Semantic Similarity"));
        assert!(output.contains("Skills Matching"));
        assert!(output.contains("kubernetes"));
    }

    #[test]
    fn test_json_output_roundtrips() {
        let formatter = JsonFormatter::new(true);
        let report = sample_report();
        let output = formatter.format_report(&report).unwrap();

        let restored: ScoreReport = serde_json::from_str(&output).unwrap();
        assert_eq!(restored.result, report.result);
    }

    #[test]
    fn test_markdown_output_structure() {
        let output = MarkdownFormatter.format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Match Score Report"));
        assert!(output.contains("| Signal | Score |"));
        assert!(output.contains("**Recommendation**"));
        assert!(output.contains("Missing: kubernetes"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false, false);
        let report = sample_report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            let output = generator.generate(&report, format).unwrap();
            assert!(!output.is_empty());
        }
    }

    #[test]
    fn test_preview_list_truncation() {
        let entries: Vec<String> = (0..30).map(|i| format!("kw{}", i)).collect();
        let preview = preview_list(&entries, 25);

        assert!(preview.contains("and 5 more"));
        assert_eq!(preview_list(&entries[..3], 25), "kw0, kw1, kw2");
    }
}
