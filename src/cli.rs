use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Seasonal precipitation bias correction by Gamma quantile mapping.
#[derive(Parser)]
#[command(
    name = "gqmdes",
    version,
    about = "Gamma quantile mapping bias correction for seasonal precipitation forecasts"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Correct one forecast run for one or more basins.
    Correct(CorrectArgs),
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "gqmdes.toml")]
    pub config: PathBuf,

    /// Run month (1-12). Defaults to the current month.
    #[arg(long = "month-target", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month_target: Option<u32>,

    /// Run year. Defaults to the current year.
    #[arg(long = "year-target")]
    pub year_target: Option<i32>,

    /// Override the archive root from config.
    #[arg(long = "local-dir")]
    pub local_dir: Option<PathBuf>,

    /// Override the forecast model from config.
    #[arg(long = "model-name")]
    pub model_name: Option<String>,

    /// Basin to correct, or the parent basin with `--micro`.
    #[arg(long)]
    pub basin: Option<String>,

    /// Correct every macro basin.
    #[arg(long = "macro", conflicts_with_all = ["micro", "all_basins"])]
    pub macro_basins: bool,

    /// Correct every micro basin of `--basin`.
    #[arg(long, requires = "basin", conflicts_with = "all_basins")]
    pub micro: bool,

    /// Correct every configured basin.
    #[arg(long = "all-basins")]
    pub all_basins: bool,
}
