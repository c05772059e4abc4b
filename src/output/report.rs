//! Score report structures

use crate::config::ResourceStatus;
use crate::processing::analyzer::MatchReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored pair plus everything needed to render or archive the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: MatchReport,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_path: String,
    pub job_path: String,
    pub generated_at: DateTime<Utc>,
    pub engine: EngineInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineInfo {
    pub taxonomy_size: usize,
    pub stopword_count: usize,
    pub resources: ResourceStatus,
}

impl ScoreReport {
    pub fn new(
        result: MatchReport,
        resume_path: String,
        job_path: String,
        engine: EngineInfo,
    ) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                resume_path,
                job_path,
                generated_at: Utc::now(),
                engine,
            },
        }
    }
}
