use std::collections::HashMap;

use crate::config::{AnalyticsConfig, PlanTargets};
use crate::error::{ComplianceError, Result, Tracker};
use crate::models::{DietEntry, MealPlanEntry, Patient, PatientId, Period, ReportRow};

/// Fold the meal plan into one row per distinct (patient, meal), in first-seen order.
///
/// Each row's period spans the earliest to the latest plan date merged into it.
/// Targets are combined per `config.plan_targets`. Fails when more than
/// `config.capacity` distinct groups are found.
pub fn group_meal_plan(plans: &[MealPlanEntry], config: &AnalyticsConfig) -> Result<Vec<ReportRow>> {
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut index: HashMap<(PatientId, &str), usize> = HashMap::new();

    for plan in plans {
        if let Some(&i) = index.get(&(plan.patient_id, plan.meal.as_str())) {
            let row = &mut rows[i];
            row.observed_period.extend_to(plan.date);
            match config.plan_targets {
                PlanTargets::Summed => {
                    row.min_cal_sum += i64::from(plan.min_cal);
                    row.max_cal_sum += i64::from(plan.max_cal);
                }
                PlanTargets::Envelope => {
                    row.min_cal_sum = row.min_cal_sum.min(i64::from(plan.min_cal));
                    row.max_cal_sum = row.max_cal_sum.max(i64::from(plan.max_cal));
                }
            }
            continue;
        }

        if rows.len() >= config.capacity {
            tracing::warn!(capacity = config.capacity, "report group table is full");
            return Err(ComplianceError::CapacityExceeded {
                tracker: Tracker::ReportGroups,
                limit: config.capacity,
            });
        }

        index.insert((plan.patient_id, plan.meal.as_str()), rows.len());
        rows.push(ReportRow {
            patient_id: plan.patient_id,
            patient_name: None,
            meal: plan.meal.clone(),
            observed_period: Period::at(plan.date),
            min_cal_sum: i64::from(plan.min_cal),
            max_cal_sum: i64::from(plan.max_cal),
            consumed_calories: 0,
        });
    }

    Ok(rows)
}

/// Fill in each row's patient name from the first patient with a matching id.
pub fn attach_names(rows: &mut [ReportRow], patients: &[Patient]) {
    for row in rows.iter_mut() {
        row.patient_name = patients
            .iter()
            .find(|p| p.id == row.patient_id)
            .map(|p| p.name.clone());
    }
}

/// Sum the calories each row's patient logged for its meal within its period.
pub fn attach_consumption(rows: &mut [ReportRow], diet: &[DietEntry]) {
    for row in rows.iter_mut() {
        row.consumed_calories = diet
            .iter()
            .filter(|e| {
                e.patient_id == row.patient_id
                    && e.meal == row.meal
                    && row.observed_period.contains(e.date)
            })
            .map(|e| i64::from(e.calories))
            .sum();
    }
}

/// Build the consolidated patient × meal summary table.
pub fn build_report(
    plans: &[MealPlanEntry],
    diet: &[DietEntry],
    patients: &[Patient],
    config: &AnalyticsConfig,
) -> Result<Vec<ReportRow>> {
    let mut rows = group_meal_plan(plans, config)?;
    attach_names(&mut rows, patients);
    attach_consumption(&mut rows, diet);

    let unnamed = rows.iter().filter(|r| r.patient_name.is_none()).count();
    tracing::debug!(rows = rows.len(), unnamed, "built summary report");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Date;

    fn jan(day: i32) -> Date {
        Date::new(day, 1, 2024)
    }

    fn week_of_lunches() -> Vec<MealPlanEntry> {
        vec![
            MealPlanEntry::new(1, jan(10), "lunch", 400, 600),
            MealPlanEntry::new(1, jan(8), "lunch", 400, 600),
            MealPlanEntry::new(1, jan(12), "lunch", 500, 700),
            MealPlanEntry::new(1, jan(9), "lunch", 400, 600),
        ]
    }

    #[test]
    fn test_period_grows_both_ways() {
        let rows = group_meal_plan(&week_of_lunches(), &AnalyticsConfig::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].observed_period, Period::new(jan(8), jan(12)));
    }

    #[test]
    fn test_summed_targets() {
        let rows = group_meal_plan(&week_of_lunches(), &AnalyticsConfig::default()).unwrap();
        assert_eq!(rows[0].min_cal_sum, 1700);
        assert_eq!(rows[0].max_cal_sum, 2500);
    }

    #[test]
    fn test_envelope_targets() {
        let config = AnalyticsConfig {
            plan_targets: PlanTargets::Envelope,
            ..AnalyticsConfig::default()
        };
        let rows = group_meal_plan(&week_of_lunches(), &config).unwrap();
        assert_eq!(rows[0].min_cal_sum, 400);
        assert_eq!(rows[0].max_cal_sum, 700);
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let plans = vec![
            MealPlanEntry::new(2, jan(1), "dinner", 1, 2),
            MealPlanEntry::new(1, jan(1), "lunch", 1, 2),
            MealPlanEntry::new(2, jan(2), "dinner", 1, 2),
            MealPlanEntry::new(2, jan(1), "lunch", 1, 2),
        ];
        let rows = group_meal_plan(&plans, &AnalyticsConfig::default()).unwrap();
        let keys: Vec<(PatientId, &str)> =
            rows.iter().map(|r| (r.patient_id, r.meal.as_str())).collect();
        assert_eq!(keys, vec![(2, "dinner"), (1, "lunch"), (2, "lunch")]);
    }

    #[test]
    fn test_group_capacity() {
        let plans: Vec<MealPlanEntry> = (0..3)
            .map(|id| MealPlanEntry::new(id, jan(1), "lunch", 1, 2))
            .collect();
        let config = AnalyticsConfig::default().with_capacity(2);
        let err = group_meal_plan(&plans, &config).unwrap_err();
        assert!(err.is_capacity_exceeded());
    }

    #[test]
    fn test_consumption_sums_every_match_in_period() {
        let plans = week_of_lunches();
        let diet = vec![
            DietEntry::new(1, jan(8), "lunch", "rice", 500),
            DietEntry::new(1, jan(12), "lunch", "pasta", 650),
            DietEntry::new(1, jan(12), "lunch", "fruit", 80),
            DietEntry::new(1, jan(13), "lunch", "late", 999),
            DietEntry::new(1, jan(9), "dinner", "soup", 300),
        ];
        let patients = vec![Patient::new(1, "Ana Silva", 912345678)];

        let rows = build_report(&plans, &diet, &patients, &AnalyticsConfig::default()).unwrap();
        assert_eq!(rows[0].consumed_calories, 1230);
        assert_eq!(rows[0].display_name(), "Ana Silva");
    }

    #[test]
    fn test_missing_patient_leaves_name_unset() {
        let rows =
            build_report(&week_of_lunches(), &[], &[], &AnalyticsConfig::default()).unwrap();
        assert_eq!(rows[0].patient_name, None);
        assert_eq!(rows[0].display_name(), "");
        assert_eq!(rows[0].consumed_calories, 0);
    }
}
