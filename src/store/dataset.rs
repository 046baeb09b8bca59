use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::analytics::{self, Accumulator, OutOfRange};
use crate::config::AnalyticsConfig;
use crate::error::Result;
use crate::models::{DietEntry, MealPlanEntry, Patient, PatientId, Period, RecordKind, ReportRow};
use crate::store::ingest::{load_records, save_records};

/// The three record collections, loaded once and queried read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub patients: Vec<Patient>,
    pub diet: Vec<DietEntry>,
    pub meal_plan: Vec<MealPlanEntry>,
}

/// Record counts for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub patients: usize,
    pub diet_entries: usize,
    pub meal_plan_entries: usize,
    pub meal_types: Vec<String>,
}

impl Dataset {
    pub fn new(patients: Vec<Patient>, diet: Vec<DietEntry>, meal_plan: Vec<MealPlanEntry>) -> Self {
        Self {
            patients,
            diet,
            meal_plan,
        }
    }

    /// Load `patients.txt`, `diet.txt` and `mealPlan.txt` from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            patients: load_records(dir.join(RecordKind::Patients.file_name()))?,
            diet: load_records(dir.join(RecordKind::Diet.file_name()))?,
            meal_plan: load_records(dir.join(RecordKind::MealPlan.file_name()))?,
        })
    }

    /// Write all three files into `dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        save_records(dir.join(RecordKind::Patients.file_name()), &self.patients)?;
        save_records(dir.join(RecordKind::Diet.file_name()), &self.diet)?;
        save_records(dir.join(RecordKind::MealPlan.file_name()), &self.meal_plan)?;
        Ok(())
    }

    /// Name of the first patient with this id.
    pub fn patient_name(&self, id: PatientId) -> Option<&str> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }

    /// Distinct meal types across diet and meal plan, sorted.
    pub fn meal_types(&self) -> Vec<&str> {
        let meals: BTreeSet<&str> = self
            .diet
            .iter()
            .map(|e| e.meal.as_str())
            .chain(self.meal_plan.iter().map(|p| p.meal.as_str()))
            .collect();
        meals.into_iter().collect()
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            patients: self.patients.len(),
            diet_entries: self.diet.len(),
            meal_plan_entries: self.meal_plan.len(),
            meal_types: self.meal_types().into_iter().map(String::from).collect(),
        }
    }

    pub fn calorie_totals(&self, period: &Period, config: &AnalyticsConfig) -> Result<Accumulator> {
        analytics::calorie_totals(&self.diet, period, config.capacity)
    }

    pub fn exceeded_calories(
        &self,
        threshold: i64,
        period: &Period,
        config: &AnalyticsConfig,
    ) -> Result<usize> {
        analytics::exceeded_calories(&self.diet, threshold, period, config.capacity)
    }

    pub fn out_of_range(&self, period: &Period, config: &AnalyticsConfig) -> Result<OutOfRange> {
        analytics::out_of_range(&self.diet, &self.meal_plan, period, config)
    }

    pub fn list_meal_plan(
        &self,
        period: &Period,
        meal: &str,
        patient_id: PatientId,
    ) -> Vec<&MealPlanEntry> {
        analytics::list_meal_plan(&self.meal_plan, period, meal, patient_id)
    }

    pub fn average_calories(&self, period: &Period, meal: &str, patient_id: PatientId) -> f64 {
        analytics::average_calories(&self.diet, period, meal, patient_id)
    }

    pub fn build_report(&self, config: &AnalyticsConfig) -> Result<Vec<ReportRow>> {
        analytics::build_report(&self.meal_plan, &self.diet, &self.patients, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Date;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Patient::new(1, "Ana Silva", 912345678),
                Patient::new(2, "Rui Costa", 934567890),
            ],
            vec![
                DietEntry::new(1, Date::new(10, 1, 2024), "lunch", "rice", 500),
                DietEntry::new(2, Date::new(10, 1, 2024), "breakfast", "toast", 250),
            ],
            vec![MealPlanEntry::new(1, Date::new(5, 1, 2024), "dinner", 400, 600)],
        )
    }

    #[test]
    fn test_patient_name() {
        let data = sample();
        assert_eq!(data.patient_name(2), Some("Rui Costa"));
        assert_eq!(data.patient_name(9), None);
    }

    #[test]
    fn test_meal_types_are_distinct_and_sorted() {
        assert_eq!(sample().meal_types(), vec!["breakfast", "dinner", "lunch"]);
    }

    #[test]
    fn test_save_and_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample();
        data.save(dir.path()).unwrap();

        let loaded = Dataset::load(dir.path()).unwrap();
        assert_eq!(loaded.stats(), data.stats());
        assert_eq!(loaded.diet, data.diet);
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Dataset::load(dir.path().join("nope")).is_err());
    }
}
