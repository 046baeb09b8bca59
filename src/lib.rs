pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod sampler;
pub mod store;

pub use config::AnalyticsConfig;
pub use error::{ComplianceError, Result};
pub use models::{Date, DietEntry, MealPlanEntry, Patient, Period, PeriodPosition, ReportRow};
pub use store::Dataset;
