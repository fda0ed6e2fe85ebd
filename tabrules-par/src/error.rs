//! Parser error type.

use tabrules_util::Line;
use thiserror::Error;

/// A rule line that the grammar could not recognize.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("{line}: unexpected token {found}, expected {expected}")]
    UnexpectedToken {
        line: Line,
        found: String,
        expected: &'static str,
    },

    #[error("{line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { line: Line, expected: &'static str },

    #[error("{line}: no rule shape matches this line")]
    NoMatchingShape { line: Line },

    #[error("{line}: trailing tokens after a complete rule")]
    TrailingTokens { line: Line },
}

impl ParseError {
    pub fn line(&self) -> Line {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEof { line, .. }
            | ParseError::NoMatchingShape { line }
            | ParseError::TrailingTokens { line } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
