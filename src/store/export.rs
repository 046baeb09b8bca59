use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::ReportRow;

/// Write the summary table rows to a CSV file with a header line.
pub fn write_report_csv(rows: &[ReportRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "patient_id",
        "patient_name",
        "meal",
        "begin",
        "end",
        "min_cal_sum",
        "max_cal_sum",
        "consumed_calories",
    ])?;

    for row in rows {
        wtr.write_record([
            row.patient_id.to_string(),
            row.display_name().to_string(),
            row.meal.clone(),
            row.observed_period.begin.to_string(),
            row.observed_period.end.to_string(),
            row.min_cal_sum.to_string(),
            row.max_cal_sum.to_string(),
            row.consumed_calories.to_string(),
        ])?;
    }

    wtr.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "exported report");
    Ok(())
}

/// Pretty JSON for any report value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Date, Period};

    fn row() -> ReportRow {
        ReportRow {
            patient_id: 7,
            patient_name: Some("Ana Silva".to_string()),
            meal: "lunch".to_string(),
            observed_period: Period::new(Date::new(1, 1, 2024), Date::new(7, 1, 2024)),
            min_cal_sum: 2800,
            max_cal_sum: 4200,
            consumed_calories: 3900,
        }
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_report_csv(&[row()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("patient_id,patient_name,meal,begin,end,min_cal_sum,max_cal_sum,consumed_calories")
        );
        assert_eq!(
            lines.next(),
            Some("7,Ana Silva,lunch,01-01-2024,07-01-2024,2800,4200,3900")
        );
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&[row()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["patient_id"], 7);
        assert_eq!(value[0]["observed_period"]["begin"]["day"], 1);
        assert_eq!(value[0]["consumed_calories"], 3900);
    }
}
