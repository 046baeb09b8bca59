pub mod menu;
pub mod prompts;
pub mod render;

pub use menu::{MenuChoice, run_menu};
pub use prompts::{
    parse_calendar_date, prompt_date, prompt_meal, prompt_patient_id, prompt_period,
    prompt_threshold, prompt_yes_no, suggest_meal,
};
pub use render::{
    display_average, display_exceeded, display_meal_plan_listing, display_out_of_range,
    display_report_table, display_stats, format_report_table,
};
