pub mod date;
pub mod records;
pub mod report;

pub use date::{Date, Period, PeriodPosition, classify};
pub use records::{
    CalorieRecord, DietEntry, MAX_TEXT_LEN, MealPlanEntry, Patient, PatientId, PatientRecord,
    RecordKind,
};
pub use report::ReportRow;
