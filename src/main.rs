mod cli;

use clap::Parser;
use depscore::aggregate::Evaluator;
use depscore::config;
use depscore::convert;
use depscore::depsdotdev::DepsDotDev;
use depscore::error::{DepscoreError, Result};
use depscore::lookup::StaticGraph;
use depscore::package::Package;
use depscore::report::{self, OutputFormat};
use depscore::types::config::DepscoreConfig;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_THRESHOLD: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,depscore={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_evaluator(config: &DepscoreConfig, graph: Option<&Path>) -> Result<Evaluator> {
    let builder = match graph {
        Some(path) => {
            let graph = Arc::new(StaticGraph::load(path)?);
            tracing::info!(path = %path.display(), packages = graph.packages.len(), "using static graph");
            Evaluator::builder()
                .intrinsic(graph.clone())
                .dependencies(graph)
        }
        None => {
            let client = Arc::new(DepsDotDev::new(config.http_settings())?);
            Evaluator::builder()
                .intrinsic(client.clone())
                .dependencies(client)
        }
    };

    Ok(builder.build()?)
}

fn output_format(flag: Option<cli::ReportFormat>, config: &DepscoreConfig) -> OutputFormat {
    match flag {
        Some(cli::ReportFormat::Text) => OutputFormat::Text,
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => config.output_format().unwrap_or(OutputFormat::Text),
    }
}

fn target_package(cmd: &cli::ScoreCommand) -> Result<Package> {
    match (&cmd.package, &cmd.ecosystem, &cmd.name, &cmd.package_version) {
        (Some(reference), _, _, _) => reference.parse(),
        (None, Some(ecosystem), Some(name), Some(version)) => {
            Ok(Package::new(ecosystem.clone(), name.clone(), version.clone()))
        }
        _ => Err(DepscoreError::InvalidPackage(
            "a package reference or --ecosystem, --name and --package-version are required"
                .to_string(),
        )),
    }
}

fn check_unit_interval(flag: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DepscoreError::InvalidInput(format!(
            "{flag} must be between 0.0 and 1.0 (found {value})"
        )))
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let package = target_package(&cmd)?;
            if let Some(threshold) = cmd.fail_under {
                check_unit_interval("--fail-under", threshold)?;
            }
            let cwd = std::env::current_dir()?;
            let loaded = config::load_config(&cwd, cli.config.as_deref())?;
            let evaluator = build_evaluator(&loaded, cmd.graph.as_deref())?;

            let evaluation = evaluator.evaluate(&package)?;
            let rendered = report::render(&evaluation, output_format(cmd.format, &loaded))?;
            println!("{rendered}");

            match cmd.fail_under {
                Some(threshold) if evaluation.score < threshold => {
                    eprintln!(
                        "score {:.3} is below the required {:.3}",
                        evaluation.score, threshold
                    );
                    Ok(exit_code::BELOW_THRESHOLD)
                }
                _ => Ok(exit_code::SUCCESS),
            }
        }
        cli::Commands::Batch(cmd) => {
            let batch = depscore::batch::BatchFile::load(&cmd.file)?;
            let cwd = std::env::current_dir()?;
            let loaded = config::load_config(&cwd, cli.config.as_deref())?;
            let evaluator = build_evaluator(&loaded, cmd.graph.as_deref())?;

            let reports = depscore::batch::run(&evaluator, &batch)?;
            let rendered = report::render_cases(&reports, output_format(cmd.format, &loaded))?;
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Convert(cmd) => {
            match (cmd.score, cmd.trustworthiness) {
                (Some(score), _) => {
                    let score = check_unit_interval("--score", score)?;
                    println!("{}", convert::trustworthiness_from_score(score));
                }
                (None, Some(trustworthiness)) => {
                    let trustworthiness = check_unit_interval("--trustworthiness", trustworthiness)?;
                    println!("{}", convert::score_from_trustworthiness(trustworthiness));
                }
                (None, None) => {
                    return Err(DepscoreError::InvalidInput(
                        "--score or --trustworthiness is required".to_string(),
                    ));
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
