//! Error handling for the tabrules CLI driver.

use thiserror::Error;

/// Top-level error type for the tabrules binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// A required configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file operation (reading a ruleset, an input file) failed.
    #[error("file operation failed: {0}")]
    FileOperation(String),

    /// No route matched the given file name.
    #[error("no route matched file name: {0}")]
    NoRoute(String),

    /// A named ruleset was not found in the loaded ruleset store.
    #[error("unknown ruleset: {0}")]
    UnknownRuleset(String),

    /// A ruleset source document failed to parse.
    #[error("ruleset {ruleset} failed to parse: {source}")]
    RulesetParse {
        ruleset: String,
        #[source]
        source: tabrules_par::ParseError,
    },

    /// The input row data could not be ingested (malformed CSV, etc).
    #[error("ingestion error: {0}")]
    Ingestion(String),

    /// An invariant the core defends should never be violated.
    #[error("internal error: {0}")]
    Internal(#[from] tabrules_util::InternalError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = CliError::Config("missing routes table".to_string());
        assert_eq!(err.to_string(), "configuration error: missing routes table");
    }

    #[test]
    fn no_route_error_display() {
        let err = CliError::NoRoute("unknown.csv".to_string());
        assert_eq!(err.to_string(), "no route matched file name: unknown.csv");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn internal_error_converts() {
        let internal = tabrules_util::InternalError::NonPositiveColumn(0);
        let cli_err: CliError = internal.into();
        assert!(matches!(cli_err, CliError::Internal(_)));
    }
}
