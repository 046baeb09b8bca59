use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analytics::constants::DEFAULT_CAPACITY;
use crate::error::Result;

/// How the out-of-range query pairs a diet entry with a plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMatch {
    /// First plan entry of the same patient, whatever its meal or date.
    #[default]
    PatientOnly,
    /// First plan entry of the same patient and meal dated inside the query period.
    PatientMealInPeriod,
}

/// How the summary table combines the targets of the plan entries it folds together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTargets {
    /// Add up `min_cal` and `max_cal` of every merged entry.
    #[default]
    Summed,
    /// Keep the lowest `min_cal` and the highest `max_cal` seen.
    Envelope,
}

/// Runtime-configurable analytics behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub capacity: usize,
    pub range_match: RangeMatch,
    pub plan_targets: PlanTargets,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            range_match: RangeMatch::default(),
            plan_targets: PlanTargets::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Load a config from a JSON file. Missing keys keep their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalyticsConfig> {
    let content = fs::read_to_string(path)?;
    let config: AnalyticsConfig = serde_json::from_str(&content)?;
    tracing::debug!(?config, "loaded analytics config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_reproduce_reference_behaviour() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.range_match, RangeMatch::PatientOnly);
        assert_eq!(config.plan_targets, PlanTargets::Summed);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"range_match": "patient_meal_in_period"}"#)
            .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.range_match, RangeMatch::PatientMealInPeriod);
        assert_eq!(config.plan_targets, PlanTargets::Summed);
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"plan_targets": "average"}"#).unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
