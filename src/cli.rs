//! CLI interface for the resume scorer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Resume and job description match scoring tool")]
#[command(
    long_about = "Score resume compatibility with job descriptions using keyword overlap, TF-IDF semantic similarity, and skill taxonomy coverage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include matched/missing keyword and skill listings
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Inspect the skill taxonomy
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

#[derive(Subcommand)]
pub enum TaxonomyAction {
    /// List taxonomy entries
    List,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
