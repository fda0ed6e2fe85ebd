//! Subcommand implementations for the tabrules CLI.

pub mod check_rules;
pub mod validate;

pub use check_rules::{run_check_rules, CheckRulesArgs, CheckRulesReport};
pub use validate::{run_validate, FailureRecord, ValidateArgs, ValidationReport};
