use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::date::Date;

pub type PatientId = i32;

/// Longest name, meal or food label kept from the record files.
pub const MAX_TEXT_LEN: usize = 49;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub phone: i64,
}

impl Patient {
    pub fn new(id: PatientId, name: impl Into<String>, phone: i64) -> Self {
        Self {
            id,
            name: name.into(),
            phone,
        }
    }
}

/// One logged meal. Several entries may share patient, date and meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietEntry {
    pub patient_id: PatientId,
    pub date: Date,
    pub meal: String,
    pub food: String,
    pub calories: i32,
}

impl DietEntry {
    pub fn new(
        patient_id: PatientId,
        date: Date,
        meal: impl Into<String>,
        food: impl Into<String>,
        calories: i32,
    ) -> Self {
        Self {
            patient_id,
            date,
            meal: meal.into(),
            food: food.into(),
            calories,
        }
    }
}

/// One planned meal on one date, with its calorie target range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub patient_id: PatientId,
    pub date: Date,
    pub meal: String,
    pub min_cal: i32,
    pub max_cal: i32,
}

impl MealPlanEntry {
    pub fn new(
        patient_id: PatientId,
        date: Date,
        meal: impl Into<String>,
        min_cal: i32,
        max_cal: i32,
    ) -> Self {
        Self {
            patient_id,
            date,
            meal: meal.into(),
            min_cal,
            max_cal,
        }
    }

    /// Whether `calories` lies inside `[min_cal, max_cal]`.
    #[inline]
    pub fn accepts(&self, calories: i32) -> bool {
        (self.min_cal..=self.max_cal).contains(&calories)
    }
}

/// Common view over dated, patient-tagged, meal-typed records.
pub trait PatientRecord {
    fn patient_id(&self) -> PatientId;
    fn date(&self) -> Date;
    fn meal(&self) -> &str;
}

/// A [`PatientRecord`] that carries a calorie amount.
pub trait CalorieRecord: PatientRecord {
    fn calories(&self) -> i32;
}

impl PatientRecord for DietEntry {
    fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    fn date(&self) -> Date {
        self.date
    }

    fn meal(&self) -> &str {
        &self.meal
    }
}

impl CalorieRecord for DietEntry {
    fn calories(&self) -> i32 {
        self.calories
    }
}

impl PatientRecord for MealPlanEntry {
    fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    fn date(&self) -> Date {
        self.date
    }

    fn meal(&self) -> &str {
        &self.meal
    }
}

/// The three record files the tool works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Patients,
    Diet,
    MealPlan,
}

impl RecordKind {
    /// File name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            RecordKind::Patients => "patients.txt",
            RecordKind::Diet => "diet.txt",
            RecordKind::MealPlan => "mealPlan.txt",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Patients => "patients",
            RecordKind::Diet => "diet",
            RecordKind::MealPlan => "meal plan",
        };
        f.write_str(label)
    }
}
