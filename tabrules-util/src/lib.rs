//! tabrules-util - shared foundation types for the rule lexer, parser and evaluator.
//!
//! Kept deliberately small: a source location (`Line`) for diagnostics and the
//! `InternalError` variant that the higher layers use to defend invariants
//! (e.g. a parsed rule must never carry a non-positive column reference).

mod error;
mod span;

pub use error::InternalError;
pub use span::Line;
