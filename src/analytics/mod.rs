pub mod accumulator;
pub mod constants;
pub mod queries;
pub mod report;

pub use accumulator::{Accumulator, calorie_totals};
pub use constants::*;
pub use queries::{OutOfRange, average_calories, exceeded_calories, list_meal_plan, out_of_range};
pub use report::{attach_consumption, attach_names, build_report, group_meal_plan};
