use super::levels::AttentionLevel;
use super::session::ScreeningOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flat record handed to export consumers. Field order is a compatibility
/// contract with the existing tabular schema; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRecord {
    pub user_id: String,
    pub scale_type: String,
    pub total_score: u32,
    pub score_level: AttentionLevel,
    pub has_risk_flag: bool,
    pub created_at: DateTime<Utc>,
}

impl ScreeningRecord {
    pub fn from_outcome(user_id: impl Into<String>, outcome: &ScreeningOutcome) -> Self {
        Self {
            user_id: user_id.into(),
            scale_type: outcome.scale.code().to_string(),
            total_score: outcome.total_score,
            score_level: outcome.level.level,
            has_risk_flag: outcome.risk_flag,
            created_at: outcome.completed_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize screening records")]
    Csv(#[from] csv::Error),
    #[error("failed to create export file {path}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to flush export output")]
    Flush(#[from] std::io::Error),
}

pub fn write_csv<W: Write>(writer: W, records: &[ScreeningRecord]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[ScreeningRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, records)
}
