use std::fmt;

use thiserror::Error;

use crate::models::RecordKind;

/// The bounded structures a query builds while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracker {
    CalorieTotals,
    OutOfRangeIds,
    ReportGroups,
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tracker::CalorieTotals => "per-patient calorie totals",
            Tracker::OutOfRangeIds => "out-of-range patient ids",
            Tracker::ReportGroups => "report groups",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("Capacity exceeded: {tracker} is limited to {limit} distinct entries")]
    CapacityExceeded { tracker: Tracker, limit: usize },

    #[error("Malformed {kind} record on line {line}: {message}")]
    Parse {
        kind: RecordKind,
        line: u64,
        message: String,
    },

    #[error("Invalid date: {0} (expected dd-mm-yyyy)")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ComplianceError {
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, ComplianceError::CapacityExceeded { .. })
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
