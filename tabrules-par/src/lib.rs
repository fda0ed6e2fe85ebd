//! tabrules-par - recursive-descent parser for rule source text.
//!
//! Turns a ruleset document into an ordered, immutable [`Ruleset`] of
//! [`Rule`]s. Each line is tokenized and parsed independently; the only
//! cross-line state is the running `rule_index` assigned to successfully
//! parsed rules.

mod ast;
mod error;
mod parser;
mod ruleset;

pub use ast::{BinOp, CompareOp, DatatypeKind, Expr, PatternOp, Rule, Value};
pub use error::{ParseError, Result};
pub use parser::Parser;
pub use ruleset::{ParsedRule, Ruleset};
