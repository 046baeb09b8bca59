use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{ComplianceError, Result};
use crate::models::date::days_in_month;
use crate::models::{Date, DietEntry, MealPlanEntry, Patient, PatientId};
use crate::store::Dataset;

const FIRST_NAMES: [&str; 10] = [
    "Ana", "Rui", "Marta", "Joao", "Ines", "Pedro", "Sofia", "Tiago", "Beatriz", "Miguel",
];

const LAST_NAMES: [&str; 8] = [
    "Silva", "Costa", "Santos", "Ferreira", "Pereira", "Oliveira", "Rodrigues", "Martins",
];

const FOODS: [&str; 12] = [
    "oatmeal", "toast", "yogurt", "rice", "pasta", "chicken", "salmon", "salad", "soup",
    "omelette", "beans", "fruit",
];

/// Parameters for a synthetic dataset.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub patients: usize,
    pub days: u32,
    pub meals: Vec<String>,
    pub start: Date,
    pub seed: u64,
    /// Probability that a logged meal misses its plan's range.
    pub out_of_range_rate: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            patients: 10,
            days: 7,
            meals: vec![
                "breakfast".to_string(),
                "lunch".to_string(),
                "dinner".to_string(),
            ],
            start: Date::new(1, 1, 2024),
            seed: 123,
            out_of_range_rate: 0.2,
        }
    }
}

/// The calendar day after `date`. Invalid input days are clamped to the month end first.
pub fn next_day(date: Date) -> Date {
    let last = days_in_month(date.month, date.year).max(1);
    if date.day < last {
        Date::new(date.day + 1, date.month, date.year)
    } else if date.month < 12 {
        Date::new(1, date.month + 1, date.year)
    } else {
        Date::new(1, 1, date.year + 1)
    }
}

/// Generate a deterministic dataset: one plan entry and one logged meal per
/// patient, day and meal type. Each patient keeps fixed targets per meal type.
pub fn generate(config: &SampleConfig) -> Result<Dataset> {
    if config.meals.is_empty() {
        return Err(ComplianceError::InvalidInput(
            "at least one meal type is required".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&config.out_of_range_rate) {
        return Err(ComplianceError::InvalidInput(format!(
            "out-of-range rate {} is not a probability",
            config.out_of_range_rate
        )));
    }
    let patient_count = PatientId::try_from(config.patients)
        .map_err(|_| ComplianceError::InvalidInput("too many patients".to_string()))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut data = Dataset::default();

    for id in 1..=patient_count {
        let first = FIRST_NAMES.choose(&mut rng).unwrap_or(&"Patient");
        let last = LAST_NAMES.choose(&mut rng).unwrap_or(&"Unknown");
        data.patients.push(Patient::new(
            id,
            format!("{} {}", first, last),
            rng.gen_range(910_000_000..=969_999_999),
        ));

        let targets: Vec<(i32, i32)> = config
            .meals
            .iter()
            .map(|_| {
                let min = rng.gen_range(30..=70) * 10;
                (min, min + rng.gen_range(15..=30) * 10)
            })
            .collect();

        let mut date = config.start;
        for _ in 0..config.days {
            for (meal, &(min_cal, max_cal)) in config.meals.iter().zip(&targets) {
                data.meal_plan
                    .push(MealPlanEntry::new(id, date, meal.as_str(), min_cal, max_cal));

                let calories = if rng.gen_bool(config.out_of_range_rate) {
                    if rng.gen_bool(0.5) {
                        min_cal - rng.gen_range(50..=200)
                    } else {
                        max_cal + rng.gen_range(50..=400)
                    }
                } else {
                    rng.gen_range(min_cal..=max_cal)
                };
                let food = FOODS.choose(&mut rng).unwrap_or(&"meal");
                data.diet
                    .push(DietEntry::new(id, date, meal.as_str(), *food, calories.max(0)));
            }
            date = next_day(date);
        }
    }

    tracing::info!(
        patients = data.patients.len(),
        diet = data.diet.len(),
        meal_plan = data.meal_plan.len(),
        seed = config.seed,
        "generated sample dataset"
    );
    Ok(data)
}
