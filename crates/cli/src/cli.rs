use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use agrolytics_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "agrolytics", version, about = "Agricultural operations analytics")]
pub struct Cli {
    /// TOML file with analytics thresholds (defaults apply when omitted).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format on stderr.
    #[arg(long, global = true, default_value = "json")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify parcel health from an activity ledger export.
    Classify {
        /// JSON array of activity records.
        #[arg(long)]
        activities: PathBuf,
        /// Reference instant (RFC 3339 or YYYY-MM-DD); defaults to now.
        #[arg(long)]
        now: Option<String>,
    },

    /// Budget vs executed spend per category.
    Variance {
        #[command(flatten)]
        ledger: LedgerArgs,
        /// Keep categories containing this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
        /// Emit CSV instead of JSON.
        #[arg(long)]
        csv: bool,
    },

    /// Budget vs executed spend across all categories.
    Summary {
        #[command(flatten)]
        ledger: LedgerArgs,
    },

    /// Executed spend per month.
    Monthly {
        /// JSON array of transaction records.
        #[arg(long)]
        transactions: PathBuf,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        parcel: Option<u64>,
    },

    /// Project a population forward under yearly rates.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// JSON array of budget lines.
    #[arg(long)]
    pub budgets: PathBuf,
    /// JSON array of transaction records.
    #[arg(long)]
    pub transactions: PathBuf,
    /// Analysis year; defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub parcel: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// First projected year; defaults to the current year.
    #[arg(long)]
    pub start_year: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    pub years: i32,
    #[arg(long, allow_hyphen_values = true)]
    pub initial: f64,
    #[arg(long, default_value_t = 0.0)]
    pub birth_rate: f64,
    #[arg(long, default_value_t = 0.0)]
    pub sale_rate: f64,
    #[arg(long, default_value_t = 0.0)]
    pub mortality_rate: f64,
    /// Wrap the projection in a named record for storage.
    #[arg(long)]
    pub record: bool,
    #[arg(long)]
    pub name: Option<String>,
}
