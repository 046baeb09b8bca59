use std::fmt::Write;

use crate::analytics::constants::{
    TABLE_ID_WIDTH, TABLE_MEAL_WIDTH, TABLE_NAME_WIDTH, TABLE_NUMBER_WIDTH,
};
use crate::analytics::{Accumulator, OutOfRange};
use crate::models::{MealPlanEntry, PatientId, Period, ReportRow};
use crate::store::DatasetStats;

fn table_rule() -> String {
    let date_width = 10;
    let widths = [
        TABLE_ID_WIDTH,
        TABLE_NAME_WIDTH,
        TABLE_MEAL_WIDTH,
        date_width,
        date_width,
        TABLE_NUMBER_WIDTH,
        TABLE_NUMBER_WIDTH,
        TABLE_NUMBER_WIDTH,
    ];
    let mut rule = String::from("+");
    for width in widths {
        rule.push_str(&"-".repeat(width + 2));
        rule.push('+');
    }
    rule
}

/// Render the consolidated summary table as boxed text.
pub fn format_report_table(rows: &[ReportRow]) -> String {
    let rule = table_rule();
    let mut output = String::new();

    let _ = writeln!(output, "{}", rule);
    let _ = writeln!(
        output,
        "| {:<iw$} | {:<nw$} | {:<mw$} | {:<10} | {:<10} | {:>cw$} | {:>cw$} | {:>cw$} |",
        "ID",
        "Patient",
        "Meal",
        "Begin",
        "End",
        "Minimum",
        "Maximum",
        "Consumed",
        iw = TABLE_ID_WIDTH,
        nw = TABLE_NAME_WIDTH,
        mw = TABLE_MEAL_WIDTH,
        cw = TABLE_NUMBER_WIDTH,
    );
    let _ = writeln!(output, "{}", rule);

    for row in rows {
        let _ = writeln!(
            output,
            "| {:0iw$} | {:<nw$} | {:<mw$} | {} | {} | {:>cw$} | {:>cw$} | {:>cw$} |",
            row.patient_id,
            row.display_name(),
            row.meal,
            row.observed_period.begin,
            row.observed_period.end,
            row.min_cal_sum,
            row.max_cal_sum,
            row.consumed_calories,
            iw = TABLE_ID_WIDTH,
            nw = TABLE_NAME_WIDTH,
            mw = TABLE_MEAL_WIDTH,
            cw = TABLE_NUMBER_WIDTH,
        );
    }

    let _ = writeln!(output, "{}", rule);
    output
}

/// Display the consolidated summary table.
pub fn display_report_table(rows: &[ReportRow]) {
    if rows.is_empty() {
        println!("The meal plan is empty; nothing to summarize.");
        return;
    }
    print!("{}", format_report_table(rows));
}

/// Display the exceeded-calories count, optionally with every patient's total.
pub fn display_exceeded(count: usize, threshold: i64, period: &Period, totals: Option<&Accumulator>) {
    println!(
        "Patients above {} calories between {}: {}",
        threshold, period, count
    );

    if let Some(totals) = totals {
        for (id, total) in totals.sorted_totals() {
            let marker = if total > threshold { "  *" } else { "" };
            println!("  {:>6}  {:>8} cal{}", id, total, marker);
        }
    }
}

/// Display the ids of patients with out-of-range meals.
pub fn display_out_of_range(result: &OutOfRange, period: &Period) {
    println!("Patients with meals outside their calorie range ({}):", period);
    if result.is_empty() {
        println!("  (none)");
    }
    for id in &result.patient_ids {
        println!("  {}", id);
    }
    println!("Total: {}", result.count());
}

/// Display a patient's planned meals of one type.
pub fn display_meal_plan_listing(
    entries: &[&MealPlanEntry],
    meal: &str,
    patient_id: PatientId,
    period: &Period,
) {
    println!("Meal plan '{}' for patient {}", meal, patient_id);
    println!("Period: {}", period);

    for entry in entries {
        println!(
            "  Date: {}, minimum: {} cal, maximum: {} cal",
            entry.date, entry.min_cal, entry.max_cal
        );
    }

    println!("{} planned meal(s) listed.", entries.len());
}

/// Display the average calories for one patient and meal.
pub fn display_average(average: f64, meal: &str, patient_id: PatientId) {
    println!(
        "Average calories for '{}' of patient {}: {:.0}",
        meal, patient_id, average
    );
}

/// Display record counts for a loaded dataset.
pub fn display_stats(stats: &DatasetStats) {
    println!("Patients:          {}", stats.patients);
    println!("Diet entries:      {}", stats.diet_entries);
    println!("Meal plan entries: {}", stats.meal_plan_entries);
    if stats.meal_types.is_empty() {
        println!("Meal types:        (none)");
    } else {
        println!("Meal types:        {}", stats.meal_types.join(", "));
    }
}
