//! tabrules-eval - value model, coercion and evaluator for parsed rules.
//!
//! The evaluator is stateless per call and holds no mutable state between
//! rows; the only shared resource is the read-dominated regex cache behind
//! [`regexcache`]. With the `parallel` feature enabled, [`evaluate_rows_parallel`]
//! evaluates rows concurrently while still assembling results in row order.

mod evaluator;
mod regexcache;
mod value;

pub use evaluator::{evaluate_rule, evaluate_row, evaluate_rows, Verdict};
#[cfg(feature = "parallel")]
pub use evaluator::evaluate_rows_parallel;
pub use value::{coerce_numeric, predicate, render_diagnostic_number, render_number, Coerced, Row, EPSILON};
