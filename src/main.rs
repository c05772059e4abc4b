//! Resume scorer: resume and job description match scoring tool

mod cli;
mod config;
mod error;
mod input;
mod processing;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, TaxonomyAction};
use config::Config;
use error::{Result, ResumeScorerError};
use input::manager::InputManager;
use log::{error, info, warn};
use output::formatter::ReportGenerator;
use output::report::{EngineInfo, ScoreReport};
use processing::analyzer::ScoreEngine;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            info!("Starting resume scoring");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeScorerError::InvalidInput(format!("Resume file: {}", e)))?;

            cli::validate_file_extension(&job, &["txt", "md"]).map_err(|e| {
                ResumeScorerError::InvalidInput(format!("Job description file: {}", e))
            })?;

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeScorerError::InvalidInput)?;

            let mut input_manager = InputManager::new();

            info!("Extracting resume text from {}", resume.display());
            let resume_text = input_manager.extract_text(&resume)?;

            info!("Extracting job description text from {}", job.display());
            let job_text = input_manager.extract_text(&job)?;

            let (scoring_config, resource_status) = config.scoring_config();
            if !resource_status.is_ready() {
                warn!("Scoring resources degraded; results may be less accurate");
            }

            // Configuration contract violations surface here, before any
            // document is scored
            let engine = ScoreEngine::new(scoring_config)?;

            let result = engine.score(&resume_text, &job_text);

            let report = ScoreReport::new(
                result,
                resume.to_string_lossy().to_string(),
                job.to_string_lossy().to_string(),
                EngineInfo {
                    taxonomy_size: engine.taxonomy_size(),
                    stopword_count: engine.stop_word_count(),
                    resources: resource_status,
                },
            );

            let generator = ReportGenerator::new(config.output.color_output, detailed);
            let rendered = generator.generate(&report, output_format)?;

            println!("{}", rendered);

            if let Some(save_path) = save {
                std::fs::write(&save_path, &rendered)?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", Config::config_path().display());
                println!("\nScoring Weights:");
                println!("  Keywords: {:.1}%", config.weights.keyword * 100.0);
                println!("  Semantic: {:.1}%", config.weights.semantic * 100.0);
                println!("  Skills: {:.1}%", config.weights.skills * 100.0);
                println!("\nRecommendation Bands:");
                for band in &config.bands {
                    println!("  ≥ {:>5.1}: {}", band.min_score, band.label);
                }
                match &config.resources.stopwords_file {
                    Some(path) => println!("\nStopwords file: {}", path.display()),
                    None => println!("\nStopwords: built-in defaults"),
                }
                match &config.resources.taxonomy_file {
                    Some(path) => println!("Taxonomy file: {}", path.display()),
                    None => println!("Taxonomy: built-in defaults"),
                }
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },

        Commands::Taxonomy { action } => match action {
            TaxonomyAction::List => {
                let (scoring_config, resource_status) = config.scoring_config();
                if !resource_status.taxonomy_ready {
                    warn!("Configured taxonomy file failed to load");
                }

                println!("📚 Skill Taxonomy ({} entries)\n", scoring_config.skill_taxonomy.len());
                for entry in &scoring_config.skill_taxonomy {
                    println!("  • {}", entry);
                }
            }
        },
    }

    Ok(())
}
