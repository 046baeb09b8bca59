use clap::Parser;
use serde_json::json;

use diet_compliance_rs::cli::{Cli, Command};
use diet_compliance_rs::config::{AnalyticsConfig, load_config};
use diet_compliance_rs::error::{ComplianceError, Result};
use diet_compliance_rs::interface::{
    display_average, display_exceeded, display_meal_plan_listing, display_out_of_range,
    display_report_table, display_stats, run_menu,
};
use diet_compliance_rs::models::Period;
use diet_compliance_rs::store::{Dataset, to_json, write_report_csv};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so report output on stdout stays clean.
fn init_tracing() {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "diet_compliance_rs=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AnalyticsConfig::default(),
    };
    if let Some(capacity) = cli.capacity {
        config = config.with_capacity(capacity);
    }

    if !cli.data_dir.is_dir() {
        return Err(ComplianceError::InvalidInput(format!(
            "data directory {} not found (expected patients.txt, diet.txt and mealPlan.txt)",
            cli.data_dir.display()
        )));
    }

    let data = Dataset::load(&cli.data_dir)?;
    tracing::debug!(
        patients = data.patients.len(),
        diet = data.diet.len(),
        meal_plan = data.meal_plan.len(),
        "dataset ready"
    );

    let command = cli.command.unwrap_or_default();
    match command {
        Command::Menu => run_menu(&data, &config),
        Command::Exceeded {
            threshold,
            period,
            verbose,
        } => cmd_exceeded(&data, &config, threshold, period.period(), verbose, cli.json),
        Command::OutOfRange { period } => {
            let period = period.period();
            let result = data.out_of_range(&period, &config)?;
            if cli.json {
                println!("{}", to_json(&result)?);
            } else {
                display_out_of_range(&result, &period);
            }
            Ok(())
        }
        Command::ListPlan {
            patient,
            meal,
            period,
        } => {
            let period = period.period();
            let entries = data.list_meal_plan(&period, &meal, patient);
            if cli.json {
                println!("{}", to_json(&entries)?);
            } else {
                display_meal_plan_listing(&entries, &meal, patient, &period);
            }
            Ok(())
        }
        Command::Average {
            patient,
            meal,
            period,
        } => {
            let period = period.period();
            let average = data.average_calories(&period, &meal, patient);
            if cli.json {
                let value = json!({ "patient_id": patient, "meal": meal, "average": average });
                println!("{}", to_json(&value)?);
            } else {
                display_average(average, &meal, patient);
            }
            Ok(())
        }
        Command::Table { csv } => {
            let rows = data.build_report(&config)?;
            if let Some(path) = &csv {
                write_report_csv(&rows, path)?;
                eprintln!("Wrote {} rows to {}", rows.len(), path.display());
            }
            if cli.json {
                println!("{}", to_json(&rows)?);
            } else {
                display_report_table(&rows);
            }
            Ok(())
        }
        Command::Stats => {
            let stats = data.stats();
            if cli.json {
                println!("{}", to_json(&stats)?);
            } else {
                display_stats(&stats);
            }
            Ok(())
        }
    }
}

/// Count patients over the limit, optionally listing every total.
fn cmd_exceeded(
    data: &Dataset,
    config: &AnalyticsConfig,
    threshold: i64,
    period: Period,
    verbose: bool,
    as_json: bool,
) -> Result<()> {
    let count = data.exceeded_calories(threshold, &period, config)?;
    let totals = if verbose {
        Some(data.calorie_totals(&period, config)?)
    } else {
        None
    };

    if as_json {
        let value = json!({
            "threshold": threshold,
            "period": period,
            "count": count,
            "totals": totals.map(|t| t.sorted_totals()),
        });
        println!("{}", to_json(&value)?);
    } else {
        display_exceeded(count, threshold, &period, totals.as_ref());
    }

    Ok(())
}
