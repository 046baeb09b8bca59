pub mod generate;

pub use generate::{SampleConfig, generate, next_day};
