//! `tabrules validate` - runs a ruleset against one input file.

use std::path::{Path, PathBuf};

use tabrules_eval::Verdict;
use tabrules_par::Ruleset;

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ingest::ingest_csv;

#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub input: PathBuf,
    /// Skips the route table and validates against this ruleset directly.
    pub ruleset: Option<String>,
}

/// One failing verdict, enriched with its row number - the shape the
/// external alert collaborator is assembled from.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub row: usize,
    pub rule_index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub file: String,
    pub ruleset: String,
    pub rows_checked: usize,
    pub failures: Vec<FailureRecord>,
}

pub fn run_validate(args: &ValidateArgs, config: &Config) -> Result<ValidationReport> {
    let file_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::FileOperation(format!("invalid file name: {}", args.input.display())))?;

    let ruleset_name = match &args.ruleset {
        Some(name) => name.clone(),
        None => {
            config
                .route(file_name)
                .map(|(name, _metadata)| name)
                .ok_or_else(|| CliError::NoRoute(file_name.to_string()))?
        }
    };

    let source = config.ruleset_source(&ruleset_name)?;
    let ruleset = Ruleset::parse(&source).map_err(|source| CliError::RulesetParse {
        ruleset: ruleset_name.clone(),
        source,
    })?;

    let rows = ingest_rows(&args.input)?;

    let mut failures = Vec::new();
    for (row_number, row) in rows.iter().enumerate() {
        let verdicts: Vec<Verdict> = tabrules_eval::evaluate_row(ruleset.rules(), row)?;
        for verdict in verdicts {
            if !verdict.passed {
                failures.push(FailureRecord {
                    row: row_number + 1,
                    rule_index: verdict.rule_index,
                    message: verdict.message,
                });
            }
        }
    }

    Ok(ValidationReport {
        file: args.input.display().to_string(),
        ruleset: ruleset_name,
        rows_checked: rows.len(),
        failures,
    })
}

fn ingest_rows(path: &Path) -> Result<Vec<tabrules_eval::Row>> {
    let file = std::fs::File::open(path)
        .map_err(|e| CliError::FileOperation(format!("opening {}: {e}", path.display())))?;
    ingest_csv(file)
}
