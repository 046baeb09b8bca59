use std::collections::HashMap;

use crate::error::{ComplianceError, Result, Tracker};
use crate::models::{CalorieRecord, Period, PatientId};

/// Running calorie totals per patient, bounded to `capacity` distinct patients.
///
/// Built fresh for every query and dropped with it.
#[derive(Debug, Clone)]
pub struct Accumulator {
    totals: HashMap<PatientId, i64>,
    capacity: usize,
}

impl Accumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            totals: HashMap::new(),
            capacity,
        }
    }

    /// Add `calories` to the patient's total.
    ///
    /// Fails without modifying anything when `patient_id` is new and the
    /// accumulator already tracks `capacity` patients.
    pub fn add(&mut self, patient_id: PatientId, calories: i32) -> Result<()> {
        if let Some(total) = self.totals.get_mut(&patient_id) {
            *total += i64::from(calories);
            return Ok(());
        }

        if self.totals.len() >= self.capacity {
            tracing::warn!(
                patient_id,
                capacity = self.capacity,
                "calorie accumulator is full"
            );
            return Err(ComplianceError::CapacityExceeded {
                tracker: Tracker::CalorieTotals,
                limit: self.capacity,
            });
        }

        self.totals.insert(patient_id, i64::from(calories));
        Ok(())
    }

    /// Total for one patient, if any calories were recorded.
    pub fn total(&self, patient_id: PatientId) -> Option<i64> {
        self.totals.get(&patient_id).copied()
    }

    /// Number of patients whose total is strictly greater than `threshold`.
    pub fn count_above(&self, threshold: i64) -> usize {
        self.totals.values().filter(|&&t| t > threshold).count()
    }

    /// All totals, sorted by patient id.
    pub fn sorted_totals(&self) -> Vec<(PatientId, i64)> {
        let mut totals: Vec<(PatientId, i64)> =
            self.totals.iter().map(|(&id, &t)| (id, t)).collect();
        totals.sort_unstable_by_key(|&(id, _)| id);
        totals
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum calories per patient over the records dated within `period`.
pub fn calorie_totals<R: CalorieRecord>(
    records: &[R],
    period: &Period,
    capacity: usize,
) -> Result<Accumulator> {
    let mut acc = Accumulator::new(capacity);
    for record in records.iter().filter(|r| period.contains(r.date())) {
        acc.add(record.patient_id(), record.calories())?;
    }
    Ok(acc)
}
