use dialoguer::Select;

use crate::config::AnalyticsConfig;
use crate::error::{ComplianceError, Result};
use crate::interface::prompts::{
    prompt_meal, prompt_patient_id, prompt_period, prompt_threshold, prompt_yes_no,
};
use crate::interface::render::{
    display_average, display_exceeded, display_meal_plan_listing, display_out_of_range,
    display_report_table,
};
use crate::store::Dataset;

/// Entries of the interactive menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ExceededCalories,
    OutOfRange,
    MealPlan,
    AverageCalories,
    SummaryTable,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ExceededCalories,
        MenuChoice::OutOfRange,
        MenuChoice::MealPlan,
        MenuChoice::AverageCalories,
        MenuChoice::SummaryTable,
        MenuChoice::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ExceededCalories => "Patients over a calorie limit",
            MenuChoice::OutOfRange => "Meals outside the planned calorie range",
            MenuChoice::MealPlan => "Meal plan for a patient",
            MenuChoice::AverageCalories => "Average calories consumed",
            MenuChoice::SummaryTable => "Summary table",
            MenuChoice::Quit => "Quit",
        }
    }
}

/// Run the interactive menu until the user quits.
pub fn run_menu(data: &Dataset, config: &AnalyticsConfig) -> Result<()> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();

    loop {
        println!();
        let selection = Select::new()
            .with_prompt("Choose a report")
            .items(&labels)
            .default(0)
            .interact()?;

        let choice = MenuChoice::ALL[selection];
        if choice == MenuChoice::Quit {
            return Ok(());
        }

        match handle_choice(choice, data, config) {
            Ok(()) => {}
            // A full tracker only spoils this report; the menu keeps going.
            Err(e @ ComplianceError::CapacityExceeded { .. }) => println!("{}", e),
            Err(e) => return Err(e),
        }
    }
}

fn handle_choice(choice: MenuChoice, data: &Dataset, config: &AnalyticsConfig) -> Result<()> {
    match choice {
        MenuChoice::ExceededCalories => {
            let threshold = prompt_threshold()?;
            let period = prompt_period()?;
            let count = data.exceeded_calories(threshold, &period, config)?;
            let totals = if prompt_yes_no("Show every patient's total?", false)? {
                Some(data.calorie_totals(&period, config)?)
            } else {
                None
            };
            display_exceeded(count, threshold, &period, totals.as_ref());
        }
        MenuChoice::OutOfRange => {
            let period = prompt_period()?;
            let result = data.out_of_range(&period, config)?;
            display_out_of_range(&result, &period);
        }
        MenuChoice::MealPlan => {
            let patient_id = prompt_patient_id()?;
            let meal = prompt_meal(&data.meal_types())?;
            let period = prompt_period()?;
            let entries = data.list_meal_plan(&period, &meal, patient_id);
            display_meal_plan_listing(&entries, &meal, patient_id, &period);
        }
        MenuChoice::AverageCalories => {
            let patient_id = prompt_patient_id()?;
            let meal = prompt_meal(&data.meal_types())?;
            let period = prompt_period()?;
            let average = data.average_calories(&period, &meal, patient_id);
            display_average(average, &meal, patient_id);
        }
        MenuChoice::SummaryTable => {
            let rows = data.build_report(config)?;
            display_report_table(&rows);
        }
        MenuChoice::Quit => {}
    }
    Ok(())
}
