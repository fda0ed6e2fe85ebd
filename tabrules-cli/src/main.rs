//! tabrules CLI - validates a tabular data file against a named rule set.
//!
//! Parses command-line arguments, initializes logging, loads configuration,
//! and dispatches to the `validate` or `check-rules` subcommand.

mod commands;
mod config;
mod error;
mod ingest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    run_check_rules, run_validate, CheckRulesArgs, CheckRulesReport, ValidateArgs, ValidationReport,
};
use config::Config;
use error::{CliError, Result};

/// tabrules - a rule-driven validator for delimited tabular data.
#[derive(Parser, Debug)]
#[command(name = "tabrules")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validates tabular data files against a named rule set", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "TABRULES_VERBOSE")]
    verbose: bool,

    /// Path to a tabrules.toml configuration file.
    #[arg(short, long, global = true, env = "TABRULES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one input file against its routed (or explicitly named) ruleset.
    Validate(ValidateCommand),

    /// Parse a named ruleset and report any syntax errors without running it.
    CheckRules(CheckRulesCommand),
}

#[derive(Parser, Debug)]
struct ValidateCommand {
    /// The file to validate.
    input: PathBuf,

    /// Validate against this ruleset, bypassing the route table.
    #[arg(short, long)]
    ruleset: Option<String>,
}

#[derive(Parser, Debug)]
struct CheckRulesCommand {
    /// Name of the ruleset to check.
    ruleset: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate(args) => {
            let report = run_validate(
                &ValidateArgs {
                    input: args.input,
                    ruleset: args.ruleset,
                },
                &config,
            )?;
            Ok(report_validate(report))
        }
        Commands::CheckRules(args) => {
            let report = run_check_rules(&CheckRulesArgs { ruleset: args.ruleset }, &config)?;
            Ok(report_check_rules(report))
        }
    }
}

fn report_validate(report: ValidationReport) -> ExitCode {
    tracing::info!(
        file = %report.file,
        ruleset = %report.ruleset,
        rows = report.rows_checked,
        failures = report.failures.len(),
        "validation complete"
    );
    for failure in &report.failures {
        println!(
            "row {} rule {}: {}",
            failure.row, failure.rule_index, failure.message
        );
    }
    if report.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn report_check_rules(report: CheckRulesReport) -> ExitCode {
    tracing::info!(
        ruleset = %report.ruleset,
        rules_parsed = report.rules_parsed,
        errors = report.errors.len(),
        "ruleset check complete"
    );
    for error in &report.errors {
        println!("{error}");
    }
    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}
