use crate::types::Metric;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{} が見つかりません。パスを確認してください。", .0.display())]
    MissingFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` not found in header")]
    MissingColumn(String),

    #[error("cannot summarize an empty view")]
    EmptyView,

    #[error("no numeric values for {0}")]
    NoNumericValues(Metric),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
