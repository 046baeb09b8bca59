use std::collections::HashSet;

use diet_compliance_rs::config::{AnalyticsConfig, PlanTargets};
use diet_compliance_rs::models::{Date, DietEntry, MealPlanEntry, Patient};
use diet_compliance_rs::store::{Dataset, write_report_csv};

fn clinic() -> Dataset {
    Dataset::new(
        vec![
            Patient::new(1, "Ana Silva", 912345678),
            Patient::new(2, "Rui Costa", 934567890),
        ],
        vec![
            DietEntry::new(1, Date::new(2, 1, 2024), "lunch", "rice", 500),
            DietEntry::new(1, Date::new(3, 1, 2024), "lunch", "pasta", 650),
            DietEntry::new(1, Date::new(9, 1, 2024), "lunch", "beans", 800),
            DietEntry::new(2, Date::new(2, 1, 2024), "dinner", "soup", 300),
        ],
        vec![
            MealPlanEntry::new(1, Date::new(3, 1, 2024), "lunch", 400, 600),
            MealPlanEntry::new(2, Date::new(2, 1, 2024), "dinner", 250, 450),
            MealPlanEntry::new(1, Date::new(1, 1, 2024), "lunch", 450, 700),
            MealPlanEntry::new(1, Date::new(1, 1, 2024), "breakfast", 200, 350),
            MealPlanEntry::new(3, Date::new(1, 1, 2024), "dinner", 300, 500),
        ],
    )
}

#[test]
fn test_one_row_per_patient_and_meal() {
    let data = clinic();
    let rows = data.build_report(&AnalyticsConfig::default()).unwrap();

    let pairs: HashSet<(i32, &str)> = data
        .meal_plan
        .iter()
        .map(|p| (p.patient_id, p.meal.as_str()))
        .collect();
    assert_eq!(rows.len(), pairs.len());

    let keys: Vec<(i32, &str)> = rows.iter().map(|r| (r.patient_id, r.meal.as_str())).collect();
    assert_eq!(keys, vec![(1, "lunch"), (2, "dinner"), (1, "breakfast"), (3, "dinner")]);
}

#[test]
fn test_summed_targets_and_consumption() {
    let rows = clinic().build_report(&AnalyticsConfig::default()).unwrap();
    let lunch = &rows[0];

    assert_eq!(lunch.min_cal_sum, 850);
    assert_eq!(lunch.max_cal_sum, 1300);
    assert_eq!(lunch.observed_period.begin, Date::new(1, 1, 2024));
    assert_eq!(lunch.observed_period.end, Date::new(3, 1, 2024));
    // The 09-01 lunch falls outside the observed period.
    assert_eq!(lunch.consumed_calories, 1150);
    assert_eq!(lunch.patient_name.as_deref(), Some("Ana Silva"));

    assert_eq!(rows[3].patient_name, None);
    assert_eq!(rows[3].consumed_calories, 0);
}

#[test]
fn test_envelope_targets() {
    let config = AnalyticsConfig {
        plan_targets: PlanTargets::Envelope,
        ..AnalyticsConfig::default()
    };
    let rows = clinic().build_report(&config).unwrap();
    assert_eq!((rows[0].min_cal_sum, rows[0].max_cal_sum), (400, 700));
}

#[test]
fn test_report_capacity() {
    let config = AnalyticsConfig::default().with_capacity(3);
    let err = clinic().build_report(&config).unwrap_err();
    assert!(err.is_capacity_exceeded());

    let config = AnalyticsConfig::default().with_capacity(4);
    assert_eq!(clinic().build_report(&config).unwrap().len(), 4);
}

#[test]
fn test_report_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let rows = clinic().build_report(&AnalyticsConfig::default()).unwrap();

    write_report_csv(&rows, &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), rows.len() + 1);
}
