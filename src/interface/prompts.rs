use dialoguer::{Confirm, Input};
use strsim::jaro_winkler;

use crate::analytics::constants::MEAL_SUGGESTION_THRESHOLD;
use crate::error::{ComplianceError, Result};
use crate::models::{Date, PatientId, Period};

/// Parse a `dd-mm-yyyy` string and require it to be a real calendar day.
pub fn parse_calendar_date(input: &str) -> std::result::Result<Date, String> {
    let date: Date = input.parse().map_err(|e: ComplianceError| e.to_string())?;
    if !date.is_valid() {
        return Err(format!("{} is not a valid calendar date", date));
    }
    Ok(date)
}

/// Prompt for a calendar-validated date, re-asking until one is given.
pub fn prompt_date(label: &str) -> Result<Date> {
    let input: String = Input::new()
        .with_prompt(format!("{} (dd-mm-yyyy)", label))
        .validate_with(|input: &String| parse_calendar_date(input).map(|_| ()))
        .interact_text()?;

    // Already validated above.
    parse_calendar_date(&input).map_err(ComplianceError::InvalidDate)
}

/// Prompt for the begin and end of a period.
///
/// An end before the begin is accepted as entered; such a period matches nothing.
pub fn prompt_period() -> Result<Period> {
    let begin = prompt_date("Period start")?;
    let end = prompt_date("Period end")?;
    let period = Period::new(begin, end);

    if period.is_inverted() {
        tracing::warn!(%period, "period ends before it begins");
        println!("Note: the period ends before it begins, so no records will match.");
    }

    Ok(period)
}

/// Prompt for a calorie threshold.
pub fn prompt_threshold() -> Result<i64> {
    Ok(Input::<i64>::new()
        .with_prompt("Calorie limit")
        .interact_text()?)
}

/// Prompt for a patient id.
pub fn prompt_patient_id() -> Result<PatientId> {
    Ok(Input::<PatientId>::new()
        .with_prompt("Patient id")
        .interact_text()?)
}

/// Closest known meal type to `input`, if any is similar enough.
///
/// Comparison is case-insensitive; an exact match returns `None` since there
/// is nothing to suggest.
pub fn suggest_meal<'a>(input: &str, known_meals: &[&'a str]) -> Option<&'a str> {
    if known_meals.iter().any(|m| *m == input) {
        return None;
    }

    let needle = input.to_lowercase();
    known_meals
        .iter()
        .map(|m| (*m, jaro_winkler(&m.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > MEAL_SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(m, _)| m)
}

/// Prompt for a meal type, offering the closest known one when the input
/// does not match exactly.
pub fn prompt_meal(known_meals: &[&str]) -> Result<String> {
    let input: String = Input::new().with_prompt("Meal").interact_text()?;
    let input = input.trim().to_string();

    if let Some(suggestion) = suggest_meal(&input, known_meals) {
        let accept = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", suggestion))
            .default(true)
            .interact()?;
        if accept {
            return Ok(suggestion.to_string());
        }
    }

    Ok(input)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
