use std::collections::BTreeSet;

use serde::Serialize;

use crate::analytics::accumulator::calorie_totals;
use crate::config::{AnalyticsConfig, RangeMatch};
use crate::error::{ComplianceError, Result, Tracker};
use crate::models::{DietEntry, MealPlanEntry, Period, PatientId, PatientRecord};

/// Whether a record belongs to `patient_id`, is of exactly `meal`, and is dated within `period`.
#[inline]
fn matches_filter<R: PatientRecord>(
    record: &R,
    period: &Period,
    meal: &str,
    patient_id: PatientId,
) -> bool {
    period.contains(record.date()) && record.patient_id() == patient_id && record.meal() == meal
}

/// Count patients whose calories within `period` add up to more than `threshold`.
///
/// Equal to the threshold does not count. Fails with `CapacityExceeded` when more
/// than `capacity` distinct patients logged meals in the period.
pub fn exceeded_calories(
    diet: &[DietEntry],
    threshold: i64,
    period: &Period,
    capacity: usize,
) -> Result<usize> {
    let totals = calorie_totals(diet, period, capacity)?;
    let count = totals.count_above(threshold);
    tracing::debug!(threshold, %period, patients = totals.len(), count, "exceeded calories");
    Ok(count)
}

/// Patients with at least one meal in `period` outside its plan's calorie range.
///
/// Ids are unique and sorted descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutOfRange {
    pub patient_ids: Vec<PatientId>,
}

impl OutOfRange {
    pub fn count(&self) -> usize {
        self.patient_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patient_ids.is_empty()
    }
}

/// The plan entry a diet entry is checked against, per the configured matching rule.
fn plan_for<'a>(
    entry: &DietEntry,
    plans: &'a [MealPlanEntry],
    period: &Period,
    rule: RangeMatch,
) -> Option<&'a MealPlanEntry> {
    plans.iter().find(|plan| {
        plan.patient_id == entry.patient_id
            && match rule {
                RangeMatch::PatientOnly => true,
                RangeMatch::PatientMealInPeriod => {
                    plan.meal == entry.meal && period.contains(plan.date)
                }
            }
    })
}

/// Find patients who logged a meal within `period` whose calories fall outside
/// the range of the plan entry it is matched with.
///
/// Each diet entry is compared against the first matching plan entry only. With
/// [`RangeMatch::PatientOnly`] that is simply the patient's first plan entry.
pub fn out_of_range(
    diet: &[DietEntry],
    plans: &[MealPlanEntry],
    period: &Period,
    config: &AnalyticsConfig,
) -> Result<OutOfRange> {
    let mut flagged: BTreeSet<PatientId> = BTreeSet::new();

    for entry in diet.iter().filter(|e| period.contains(e.date)) {
        if flagged.contains(&entry.patient_id) {
            continue;
        }

        let Some(plan) = plan_for(entry, plans, period, config.range_match) else {
            continue;
        };

        if plan.accepts(entry.calories) {
            continue;
        }

        if flagged.len() >= config.capacity {
            tracing::warn!(capacity = config.capacity, "out-of-range tracker is full");
            return Err(ComplianceError::CapacityExceeded {
                tracker: Tracker::OutOfRangeIds,
                limit: config.capacity,
            });
        }
        flagged.insert(entry.patient_id);
    }

    let patient_ids: Vec<PatientId> = flagged.into_iter().rev().collect();
    tracing::debug!(%period, count = patient_ids.len(), "out of range");
    Ok(OutOfRange { patient_ids })
}

/// Plan entries of one patient and meal dated within `period`, in their original order.
pub fn list_meal_plan<'a>(
    plans: &'a [MealPlanEntry],
    period: &Period,
    meal: &str,
    patient_id: PatientId,
) -> Vec<&'a MealPlanEntry> {
    let listed: Vec<&MealPlanEntry> = plans
        .iter()
        .filter(|p| matches_filter(*p, period, meal, patient_id))
        .collect();
    tracing::debug!(patient_id, meal, %period, count = listed.len(), "list meal plan");
    listed
}

/// Mean calories of one patient's `meal` entries within `period`; `0.0` when none match.
pub fn average_calories(
    diet: &[DietEntry],
    period: &Period,
    meal: &str,
    patient_id: PatientId,
) -> f64 {
    let (sum, count) = diet
        .iter()
        .filter(|e| matches_filter(*e, period, meal, patient_id))
        .fold((0_i64, 0_u32), |(sum, count), e| {
            (sum + i64::from(e.calories), count + 1)
        });

    if count == 0 {
        return 0.0;
    }
    sum as f64 / f64::from(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Date;

    fn jan(day: i32) -> Date {
        Date::new(day, 1, 2024)
    }

    fn january() -> Period {
        Period::new(jan(1), jan(31))
    }

    #[test]
    fn test_exceeded_is_monotonic_in_threshold() {
        let diet = vec![
            DietEntry::new(1, jan(2), "lunch", "rice", 800),
            DietEntry::new(2, jan(3), "lunch", "pasta", 1200),
            DietEntry::new(3, jan(4), "lunch", "salad", 300),
            DietEntry::new(3, jan(5), "dinner", "steak", 900),
        ];

        let mut previous = usize::MAX;
        for threshold in (0..=1500).step_by(100) {
            let count = exceeded_calories(&diet, threshold, &january(), 100).unwrap();
            assert!(count <= previous, "threshold {threshold}");
            previous = count;
        }
    }

    #[test]
    fn test_out_of_range_first_plan_entry_decides() {
        let plans = vec![
            MealPlanEntry::new(1, jan(1), "lunch", 400, 600),
            MealPlanEntry::new(1, jan(2), "lunch", 600, 900),
        ];
        // In range of the second entry only; the first one is what counts.
        let diet = vec![DietEntry::new(1, jan(10), "lunch", "rice", 700)];

        let result = out_of_range(&diet, &plans, &january(), &AnalyticsConfig::default()).unwrap();
        assert_eq!(result.patient_ids, vec![1]);
    }

    #[test]
    fn test_out_of_range_patient_only_ignores_meal() {
        let plans = vec![MealPlanEntry::new(1, jan(1), "dinner", 100, 200)];
        let diet = vec![DietEntry::new(1, jan(10), "lunch", "rice", 700)];

        let literal = out_of_range(&diet, &plans, &january(), &AnalyticsConfig::default()).unwrap();
        assert_eq!(literal.patient_ids, vec![1]);

        let config = AnalyticsConfig {
            range_match: RangeMatch::PatientMealInPeriod,
            ..AnalyticsConfig::default()
        };
        let corrected = out_of_range(&diet, &plans, &january(), &config).unwrap();
        assert!(corrected.is_empty());
    }

    #[test]
    fn test_out_of_range_corrected_requires_plan_in_period() {
        let plans = vec![
            MealPlanEntry::new(1, Date::new(1, 12, 2023), "lunch", 100, 200),
            MealPlanEntry::new(1, jan(5), "lunch", 400, 800),
        ];
        let diet = vec![DietEntry::new(1, jan(10), "lunch", "rice", 700)];
        let config = AnalyticsConfig {
            range_match: RangeMatch::PatientMealInPeriod,
            ..AnalyticsConfig::default()
        };

        let result = out_of_range(&diet, &plans, &january(), &config).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_out_of_range_without_plan_is_not_flagged() {
        let diet = vec![DietEntry::new(7, jan(10), "lunch", "rice", 5000)];
        let result = out_of_range(&diet, &[], &january(), &AnalyticsConfig::default()).unwrap();
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_out_of_range_capacity() {
        let plans: Vec<MealPlanEntry> = (1..=3)
            .map(|id| MealPlanEntry::new(id, jan(1), "lunch", 0, 10))
            .collect();
        let diet: Vec<DietEntry> = (1..=3)
            .map(|id| DietEntry::new(id, jan(2), "lunch", "rice", 500))
            .collect();

        let config = AnalyticsConfig::default().with_capacity(2);
        let err = out_of_range(&diet, &plans, &january(), &config).unwrap_err();
        assert!(err.is_capacity_exceeded());

        let config = AnalyticsConfig::default().with_capacity(3);
        let result = out_of_range(&diet, &plans, &january(), &config).unwrap();
        assert_eq!(result.patient_ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_list_meal_plan_keeps_order() {
        let plans = vec![
            MealPlanEntry::new(1, jan(3), "lunch", 400, 600),
            MealPlanEntry::new(1, jan(1), "lunch", 300, 500),
            MealPlanEntry::new(2, jan(2), "lunch", 400, 600),
            MealPlanEntry::new(1, jan(2), "Lunch", 400, 600),
        ];

        let listed = list_meal_plan(&plans, &january(), "lunch", 1);
        let dates: Vec<Date> = listed.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![jan(3), jan(1)]);
    }

    #[test]
    fn test_average_calories() {
        let diet = vec![
            DietEntry::new(1, jan(2), "lunch", "rice", 500),
            DietEntry::new(1, jan(3), "lunch", "pasta", 701),
            DietEntry::new(1, jan(3), "dinner", "soup", 100),
            DietEntry::new(1, Date::new(1, 2, 2024), "lunch", "cake", 9000),
        ];
        assert_eq!(average_calories(&diet, &january(), "lunch", 1), 600.5);
        assert_eq!(average_calories(&diet, &january(), "dinner", 1), 100.0);
        assert_eq!(average_calories(&diet, &january(), "brunch", 1), 0.0);
        assert_eq!(average_calories(&diet, &january(), "lunch", 2), 0.0);
    }
}
