use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};

use crate::error::{ComplianceError, Result};
use crate::models::{Date, DietEntry, MAX_TEXT_LEN, MealPlanEntry, Patient, RecordKind};

/// Field-level parse outcome; the message is wrapped into a line-numbered error by the reader.
type FieldResult<T> = std::result::Result<T, String>;

/// A record kind stored as one semicolon-delimited line per record.
///
/// ```text
/// patients:   1; Ana Silva;912345678
/// diet:       1;10-01-2024; lunch;rice;500
/// meal plan:  1;05-01-2024; lunch; 400 Cal, 600 Cal
/// ```
pub trait TextRecord: Sized {
    const KIND: RecordKind;
    const FIELDS: usize;

    fn from_fields(fields: &StringRecord) -> FieldResult<Self>;
    fn to_fields(&self) -> Vec<String>;
}

fn number_field<T: FromStr>(fields: &StringRecord, idx: usize, label: &str) -> FieldResult<T> {
    let raw = fields.get(idx).unwrap_or("");
    raw.parse()
        .map_err(|_| format!("{} '{}' is not a number", label, raw))
}

/// Text field cut to [`MAX_TEXT_LEN`] characters.
fn text_field(fields: &StringRecord, idx: usize, label: &str) -> FieldResult<String> {
    let raw = fields.get(idx).unwrap_or("");
    if raw.is_empty() {
        return Err(format!("{} is empty", label));
    }
    if raw.chars().count() > MAX_TEXT_LEN {
        tracing::warn!(field = label, value = raw, "truncating to {} characters", MAX_TEXT_LEN);
        return Ok(raw.chars().take(MAX_TEXT_LEN).collect());
    }
    Ok(raw.to_string())
}

fn date_field(fields: &StringRecord, idx: usize) -> FieldResult<Date> {
    fields
        .get(idx)
        .unwrap_or("")
        .parse()
        .map_err(|e: ComplianceError| e.to_string())
}

/// Parse `400 Cal, 600 Cal` into `(400, 600)`.
fn parse_calorie_range(raw: &str) -> FieldResult<(i32, i32)> {
    let (min, max) = raw
        .split_once(',')
        .ok_or_else(|| format!("calorie range '{}' should look like '400 Cal, 600 Cal'", raw))?;

    let amount = |part: &str| -> FieldResult<i32> {
        let trimmed = part.trim();
        let number = trimmed.strip_suffix("Cal").unwrap_or(trimmed).trim();
        number
            .parse()
            .map_err(|_| format!("calorie amount '{}' is not a number", trimmed))
    };

    Ok((amount(min)?, amount(max)?))
}

impl TextRecord for Patient {
    const KIND: RecordKind = RecordKind::Patients;
    const FIELDS: usize = 3;

    fn from_fields(fields: &StringRecord) -> FieldResult<Self> {
        Ok(Patient {
            id: number_field(fields, 0, "id")?,
            name: text_field(fields, 1, "name")?,
            phone: number_field(fields, 2, "phone")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.phone.to_string()]
    }
}

impl TextRecord for DietEntry {
    const KIND: RecordKind = RecordKind::Diet;
    const FIELDS: usize = 5;

    fn from_fields(fields: &StringRecord) -> FieldResult<Self> {
        Ok(DietEntry {
            patient_id: number_field(fields, 0, "id")?,
            date: date_field(fields, 1)?,
            meal: text_field(fields, 2, "meal")?,
            food: text_field(fields, 3, "food")?,
            calories: number_field(fields, 4, "calories")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.patient_id.to_string(),
            self.date.to_string(),
            self.meal.clone(),
            self.food.clone(),
            self.calories.to_string(),
        ]
    }
}

impl TextRecord for MealPlanEntry {
    const KIND: RecordKind = RecordKind::MealPlan;
    const FIELDS: usize = 4;

    fn from_fields(fields: &StringRecord) -> FieldResult<Self> {
        let (min_cal, max_cal) = parse_calorie_range(fields.get(3).unwrap_or(""))?;
        Ok(MealPlanEntry {
            patient_id: number_field(fields, 0, "id")?,
            date: date_field(fields, 1)?,
            meal: text_field(fields, 2, "meal")?,
            min_cal,
            max_cal,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.patient_id.to_string(),
            self.date.to_string(),
            self.meal.clone(),
            format!("{} Cal, {} Cal", self.min_cal, self.max_cal),
        ]
    }
}

/// Read records of one kind from any reader.
///
/// Lines are split on `;` only; quotes are ordinary characters. Blank and
/// whitespace-only lines are skipped.
pub fn read_records<T: TextRecord, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let fields = result?;
        if fields.iter().all(str::is_empty) {
            continue;
        }
        let line = fields.position().map(|p| p.line()).unwrap_or(0);

        if fields.len() != T::FIELDS {
            return Err(ComplianceError::Parse {
                kind: T::KIND,
                line,
                message: format!("expected {} fields, found {}", T::FIELDS, fields.len()),
            });
        }

        let record = T::from_fields(&fields).map_err(|message| ComplianceError::Parse {
            kind: T::KIND,
            line,
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Load records of one kind from a file.
pub fn load_records<T: TextRecord, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let records = read_records(File::open(path)?)?;
    tracing::info!(kind = %T::KIND, path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Write records of one kind in the same line format they are read from.
pub fn write_records<T: TextRecord, W: Write>(writer: W, records: &[T]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    for record in records {
        wtr.write_record(record.to_fields())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save records of one kind to a file, replacing it.
pub fn save_records<T: TextRecord, P: AsRef<Path>>(path: P, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    write_records(File::create(path)?, records)?;
    tracing::info!(kind = %T::KIND, path = %path.display(), count = records.len(), "saved records");
    Ok(())
}
