use std::path::PathBuf;

use clap::Parser;

use diet_compliance_rs::interface::parse_calendar_date;
use diet_compliance_rs::models::Date;
use diet_compliance_rs::sampler::{SampleConfig, generate};

#[derive(Parser, Debug)]
#[command(name = "sampler")]
#[command(about = "Generate synthetic patient, diet and meal plan files")]
struct Args {
    /// Number of patients
    #[arg(long, default_value = "10")]
    patients: usize,

    /// Consecutive days of plans and logged meals per patient
    #[arg(long, default_value = "7")]
    days: u32,

    /// Meal types (comma-separated)
    #[arg(long, default_value = "breakfast,lunch,dinner")]
    meals: String,

    /// First day (dd-mm-yyyy)
    #[arg(long, default_value = "01-01-2024", value_parser = parse_calendar_date)]
    start: Date,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Probability that a logged meal misses its planned range
    #[arg(long, default_value = "0.2")]
    out_of_range_rate: f64,

    /// Output directory for patients.txt, diet.txt and mealPlan.txt
    #[arg(long, default_value = "data")]
    out: PathBuf,
}

fn parse_meals(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "diet_compliance_rs=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SampleConfig {
        patients: args.patients,
        days: args.days,
        meals: parse_meals(&args.meals),
        start: args.start,
        seed: args.seed,
        out_of_range_rate: args.out_of_range_rate,
    };

    let data = match generate(&config) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error generating data: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = data.save(&args.out) {
        eprintln!("Error writing {:?}: {}", args.out, e);
        std::process::exit(1);
    }

    println!(
        "Wrote {} patients, {} diet entries and {} meal plan entries to {:?}",
        data.patients.len(),
        data.diet.len(),
        data.meal_plan.len(),
        args.out
    );
}
