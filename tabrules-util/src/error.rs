//! Core error types shared by tabrules-par and tabrules-eval.

use thiserror::Error;

/// An invariant violation that should never occur given a well-formed
/// parsed rule. Defended explicitly rather than trusted, so a bug upstream
/// surfaces as an `Err` instead of a silent miscomparison or a panic deep
/// in evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A column reference was constructed with a non-positive index.
    #[error("internal error: column reference {0} is not positive")]
    NonPositiveColumn(i64),
}
