use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::interface::parse_calendar_date;
use crate::models::{Date, PatientId, Period};

/// Diet compliance: check patients' logged meals against their meal plans.
#[derive(Parser, Debug)]
#[command(name = "diet_compliance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding patients.txt, diet.txt and mealPlan.txt.
    #[arg(short, long, default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// JSON file with analytics settings.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the number of distinct entries a report may track.
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
}

/// A closed date range given on the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct PeriodArgs {
    /// First day of the period (dd-mm-yyyy).
    #[arg(long, value_parser = parse_calendar_date)]
    pub from: Date,

    /// Last day of the period (dd-mm-yyyy).
    #[arg(long, value_parser = parse_calendar_date)]
    pub to: Date,
}

impl PeriodArgs {
    pub fn period(&self) -> Period {
        Period::new(self.from, self.to)
    }
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Interactive report menu.
    #[default]
    Menu,

    /// Count patients whose calories in a period exceed a limit.
    Exceeded {
        /// Calorie limit; a total equal to it does not count.
        #[arg(long)]
        threshold: i64,

        #[command(flatten)]
        period: PeriodArgs,

        /// Also list every patient's total.
        #[arg(short, long)]
        verbose: bool,
    },

    /// List patients with meals outside their planned calorie range.
    OutOfRange {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// List a patient's planned meals of one type.
    ListPlan {
        #[arg(long)]
        patient: PatientId,

        /// Meal type, matched exactly.
        #[arg(long)]
        meal: String,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Average calories a patient consumed for one meal type.
    Average {
        #[arg(long)]
        patient: PatientId,

        /// Meal type, matched exactly.
        #[arg(long)]
        meal: String,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Consolidated patient × meal summary table.
    Table {
        /// Also export the rows to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show record counts and meal types of the loaded data.
    Stats,
}
