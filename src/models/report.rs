use serde::{Deserialize, Serialize};

use crate::models::date::Period;
use crate::models::records::PatientId;

/// One consolidated (patient, meal) line of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub patient_id: PatientId,

    /// `None` when the patient file has no record for this id.
    pub patient_name: Option<String>,

    pub meal: String,

    /// Span between the earliest and latest plan dates folded into this row.
    pub observed_period: Period,

    pub min_cal_sum: i64,
    pub max_cal_sum: i64,

    /// Calories logged for this patient and meal within `observed_period`.
    pub consumed_calories: i64,
}

impl ReportRow {
    pub fn display_name(&self) -> &str {
        self.patient_name.as_deref().unwrap_or("")
    }
}
