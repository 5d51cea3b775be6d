use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "depscore",
    version,
    about = "Aggregated dependency score: trust in a package and everything it pulls in"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Extra config file, applied over the global and working-directory configs
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the aggregated score of one package
    Score(ScoreCommand),
    /// Evaluate every case of a JSON batch file
    Batch(BatchCommand),
    /// Convert between score and trustworthiness
    Convert(ConvertCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Package URL (pkg:pypi/requests@2.28.1) or deps.dev, npmjs.com or pypi.org page URL
    #[arg(
        required_unless_present_all = ["ecosystem", "name", "package_version"],
        conflicts_with_all = ["ecosystem", "name", "package_version"]
    )]
    pub package: Option<String>,

    #[arg(long, requires_all = ["name", "package_version"])]
    pub ecosystem: Option<String>,

    #[arg(long, requires_all = ["ecosystem", "package_version"])]
    pub name: Option<String>,

    #[arg(long = "package-version", requires_all = ["ecosystem", "name"])]
    pub package_version: Option<String>,

    /// Evaluate against a TOML graph file instead of deps.dev
    #[arg(long)]
    pub graph: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Exit with code 1 when the score is below this value
    #[arg(long)]
    pub fail_under: Option<f64>,
}

#[derive(Args)]
pub struct BatchCommand {
    pub file: PathBuf,

    /// Evaluate against a TOML graph file instead of deps.dev
    #[arg(long)]
    pub graph: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ConvertCommand {
    #[arg(
        long,
        required_unless_present = "trustworthiness",
        conflicts_with = "trustworthiness"
    )]
    pub score: Option<f64>,

    #[arg(long, required_unless_present = "score", conflicts_with = "score")]
    pub trustworthiness: Option<f64>,
}
