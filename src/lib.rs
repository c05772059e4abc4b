//! Resume scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::{Config, ScoringConfig};
pub use error::{Result, ResumeScorerError};
pub use processing::analyzer::{MatchReport, ScoreEngine};
