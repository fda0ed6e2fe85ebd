//! tabrules-lex - tokenizer for one rule line.
//!
//! A rule line is tokenized eagerly and in full before the parser sees it;
//! there is no streaming interface because rule lines are short and already
//! resident in memory by the time this crate runs.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, NumberLit, Token};
