//! Splits a ruleset source document into rule lines and parses each one.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::Rule;
use tabrules_util::Line;

/// One parsed rule together with the bookkeeping the evaluator's verdicts
/// need: the source line it came from (for diagnostics) and its 0-based
/// position among the ruleset's rules (the `rule_index` in a verdict).
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedRule {
    pub rule: Rule,
    pub line: Line,
    pub rule_index: usize,
}

/// An ordered, immutable list of parsed rules. Once built, a `Ruleset` is
/// `Send + Sync` and safe to share across concurrent row evaluations - it
/// holds no interior mutability anywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ruleset {
    rules: Vec<ParsedRule>,
}

impl Ruleset {
    pub fn rules(&self) -> &[ParsedRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parses every rule line in `source`. Rejects the whole document on
    /// the first syntax error: a caller that wants to keep whatever parsed
    /// cleanly should use [`Ruleset::parse_lenient`] instead.
    pub fn parse(source: &str) -> Result<Ruleset, ParseError> {
        let mut rules = Vec::new();
        for (line, text) in significant_lines(source) {
            let rule = Parser::new(text, line).parse_rule()?;
            rules.push(ParsedRule {
                rule,
                line,
                rule_index: rules.len(),
            });
        }
        Ok(Ruleset { rules })
    }

    /// Parses every rule line, keeping every rule that parsed successfully
    /// and returning the errors for the lines that did not. A failing line
    /// is dropped, never silently replaced with a no-op rule.
    pub fn parse_lenient(source: &str) -> (Ruleset, Vec<ParseError>) {
        let mut rules = Vec::new();
        let mut errors = Vec::new();
        for (line, text) in significant_lines(source) {
            match Parser::new(text, line).parse_rule() {
                Ok(rule) => rules.push(ParsedRule {
                    rule,
                    line,
                    rule_index: rules.len(),
                }),
                Err(err) => errors.push(err),
            }
        }
        (Ruleset { rules }, errors)
    }
}

/// Yields each non-blank, non-comment line with its 1-based line number,
/// trimmed of surrounding whitespace. Handles any line ending: splitting on
/// `\n` and trimming takes care of a trailing `\r` from CRLF input too.
fn significant_lines(source: &str) -> impl Iterator<Item = (Line, &str)> {
    source.split('\n').enumerate().filter_map(|(idx, raw)| {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            Some((Line::new(idx as u32 + 1), trimmed))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, Value};

    #[test]
    fn skips_blank_and_comment_lines() {
        let source = "\n# a comment\n1C REQUIRED\n\n2C IS NUMERIC\n";
        let ruleset = Ruleset::parse(source).unwrap();
        assert_eq!(ruleset.len(), 2);
        assert_eq!(ruleset.rules()[0].line, Line::new(3));
        assert_eq!(ruleset.rules()[1].line, Line::new(5));
    }

    #[test]
    fn rule_index_is_assigned_in_order() {
        let source = "1C REQUIRED\n2C REQUIRED\n3C REQUIRED\n";
        let ruleset = Ruleset::parse(source).unwrap();
        let indices: Vec<usize> = ruleset.rules().iter().map(|r| r.rule_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn strict_parse_rejects_whole_document_on_first_error() {
        let source = "1C REQUIRED\n2C\n3C IS NUMERIC\n";
        assert!(Ruleset::parse(source).is_err());
    }

    #[test]
    fn lenient_parse_keeps_good_rules_and_reports_bad_ones() {
        let source = "1C REQUIRED\n2C\n3C IS NUMERIC\n";
        let (ruleset, errors) = Ruleset::parse_lenient(source);
        assert_eq!(ruleset.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), Line::new(2));
    }

    #[test]
    fn comparison_is_picked_out_by_shape() {
        let ruleset = Ruleset::parse("4C = 3C\n").unwrap();
        assert_eq!(
            ruleset.rules()[0].rule,
            Rule::Comparison {
                col: 4,
                op: CompareOp::Eq,
                value: Value::Col(3)
            }
        );
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let source = "1C REQUIRED\r\n2C IS NUMERIC\r\n";
        let ruleset = Ruleset::parse(source).unwrap();
        assert_eq!(ruleset.len(), 2);
    }
}
