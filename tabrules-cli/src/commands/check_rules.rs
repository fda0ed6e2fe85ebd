//! `tabrules check-rules` - parses a ruleset without running it against data.

use tabrules_par::{ParseError, Ruleset};

use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CheckRulesArgs {
    pub ruleset: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckRulesReport {
    pub ruleset: String,
    pub rules_parsed: usize,
    pub errors: Vec<ParseError>,
}

impl CheckRulesReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses the named ruleset leniently: every line that parses is counted,
/// every line that does not is reported without aborting the whole check.
pub fn run_check_rules(args: &CheckRulesArgs, config: &Config) -> Result<CheckRulesReport> {
    let source = config.ruleset_source(&args.ruleset)?;
    let (ruleset, errors) = Ruleset::parse_lenient(&source);
    Ok(CheckRulesReport {
        ruleset: args.ruleset.clone(),
        rules_parsed: ruleset.len(),
        errors,
    })
}
