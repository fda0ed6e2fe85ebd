//! Recursive-descent parser for one rule line.
//!
//! Every production starts with a `COL`, so the parser commits to a shape
//! only after looking at the token that follows it. The one genuine
//! ambiguity is `COL '=' ...`, shared by `arithmetic` and `comparison`;
//! that is resolved structurally once the right-hand side has been parsed
//! (see `classify_equals`), rather than with extra lookahead.

use crate::ast::{BinOp, CompareOp, DatatypeKind, Expr, PatternOp, Rule, Value};
use crate::error::{ParseError, Result};
use tabrules_lex::{Lexer, NumberLit, Token};
use tabrules_util::Line;

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    line: Line,
}

impl Parser {
    /// Lexes `source` and prepares a parser for exactly one rule.
    pub fn new(source: &str, line: Line) -> Self {
        Self {
            tokens: Lexer::tokenize(source),
            position: 0,
            line,
        }
    }

    /// Parses the whole line as one rule. Any tokens left over after a
    /// complete production is recognized are a `TrailingTokens` error: the
    /// grammar never allows more than one rule per line.
    pub fn parse_rule(&mut self) -> Result<Rule> {
        let col = self.expect_col()?;
        let rule = match self.current() {
            Token::Is => self.parse_datatype(col)?,
            Token::Between => self.parse_range(col)?,
            Token::Required => {
                self.advance();
                Rule::Required { col }
            }
            Token::Matches => self.parse_pattern(col, PatternOp::Matches)?,
            Token::Contains => self.parse_pattern(col, PatternOp::Contains)?,
            Token::NotContains => self.parse_pattern(col, PatternOp::NotContains)?,
            Token::StartsWith => self.parse_pattern(col, PatternOp::StartsWith)?,
            Token::EndsWith => self.parse_pattern(col, PatternOp::EndsWith)?,
            Token::Eq => self.parse_equals(col)?,
            Token::NotEq => self.parse_comparison(col, CompareOp::NotEq)?,
            Token::Gt => self.parse_comparison(col, CompareOp::Gt)?,
            Token::Lt => self.parse_comparison(col, CompareOp::Lt)?,
            Token::GtEq => self.parse_comparison(col, CompareOp::GtEq)?,
            Token::LtEq => self.parse_comparison(col, CompareOp::LtEq)?,
            _ => return Err(ParseError::NoMatchingShape { line: self.line }),
        };

        if self.current() != Token::Eof {
            return Err(ParseError::TrailingTokens { line: self.line });
        }
        Ok(rule)
    }

    fn parse_datatype(&mut self, col: u32) -> Result<Rule> {
        self.advance(); // IS
        let kind = match self.current() {
            Token::Alphanum => DatatypeKind::Alphanum,
            Token::Numeric => DatatypeKind::Numeric,
            Token::Integer => DatatypeKind::Integer,
            Token::Float => DatatypeKind::Float,
            Token::StringType => DatatypeKind::StringType,
            _ => {
                return Err(self.unexpected("a datatype name"));
            }
        };
        self.advance();
        Ok(Rule::Datatype { col, kind })
    }

    fn parse_range(&mut self, col: u32) -> Result<Rule> {
        self.advance(); // BETWEEN
        let min = self.expect_number()?;
        self.expect(Token::And, "AND")?;
        let max = self.expect_number()?;
        Ok(Rule::Range { col, min, max })
    }

    fn parse_pattern(&mut self, col: u32, op: PatternOp) -> Result<Rule> {
        self.advance(); // the pattern keyword
        let text = self.expect_string()?;
        Ok(Rule::Pattern { col, op, text })
    }

    fn parse_comparison(&mut self, col: u32, op: CompareOp) -> Result<Rule> {
        self.advance(); // the comparison operator
        let value = self.parse_value()?;
        Ok(Rule::Comparison { col, op, value })
    }

    /// `COL '=' ...` resolves to `comparison` when the right-hand side is a
    /// single value and to `arithmetic` when it is a compound expression.
    fn parse_equals(&mut self, col: u32) -> Result<Rule> {
        self.advance(); // '='
        let (expr, parenthesized) = self.parse_expression()?;
        Ok(match classify_equals(expr, parenthesized) {
            EqualsShape::Comparison(value) => Rule::Comparison {
                col,
                op: CompareOp::Eq,
                value,
            },
            EqualsShape::Arithmetic(expr) => Rule::Arithmetic { target: col, expr },
        })
    }

    fn parse_value(&mut self) -> Result<Value> {
        let value = match self.current() {
            Token::Number(n) => Value::Number(n.as_f64()),
            Token::String(s) => Value::Text(s.clone()),
            Token::Col(c) => Value::Col(c),
            _ => return Err(self.unexpected("a number, string or column reference")),
        };
        self.advance();
        Ok(value)
    }

    // expression := term (('+' | '-') term)*
    //
    // Returns whether the whole expression was a single parenthesized
    // factor, so `classify_equals` can see through the flattened `Expr`
    // tree (parens carry no node of their own) back to the source syntax.
    fn parse_expression(&mut self) -> Result<(Expr, bool)> {
        let (mut lhs, mut parenthesized) = self.parse_term()?;
        loop {
            let op = match self.current() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let (rhs, _) = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
            parenthesized = false;
        }
        Ok((lhs, parenthesized))
    }

    // term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Result<(Expr, bool)> {
        let (mut lhs, mut parenthesized) = self.parse_factor()?;
        loop {
            let op = match self.current() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let (rhs, _) = self.parse_factor()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
            parenthesized = false;
        }
        Ok((lhs, parenthesized))
    }

    // factor := COL | NUMBER | '(' expression ')'
    fn parse_factor(&mut self) -> Result<(Expr, bool)> {
        match self.current() {
            Token::Col(c) => {
                self.advance();
                Ok((Expr::Col(c), false))
            }
            Token::Number(n) => {
                self.advance();
                Ok((Expr::Number(n.as_f64()), false))
            }
            Token::LParen => {
                self.advance();
                let (inner, _) = self.parse_expression()?;
                self.expect(Token::RParen, "')'")?;
                Ok((inner, true))
            }
            _ => Err(self.unexpected("a column reference, number or '('")),
        }
    }

    fn expect_col(&mut self) -> Result<u32> {
        match self.current() {
            Token::Col(c) => {
                self.advance();
                Ok(c)
            }
            _ => Err(self.unexpected("a column reference")),
        }
    }

    fn expect_number(&mut self) -> Result<f64> {
        match self.current() {
            Token::Number(n) => {
                self.advance();
                Ok(n.as_f64())
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.current() {
            Token::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected("a quoted string")),
        }
    }

    fn expect(&mut self, expected: Token, name: &'static str) -> Result<()> {
        if self.current() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(name))
        }
    }

    fn current(&self) -> Token {
        self.tokens.get(self.position).cloned().unwrap_or(Token::Eof)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Token::Eof => ParseError::UnexpectedEof {
                line: self.line,
                expected,
            },
            other => ParseError::UnexpectedToken {
                line: self.line,
                found: format!("{:?}", other),
                expected,
            },
        }
    }
}

enum EqualsShape {
    Comparison(Value),
    Arithmetic(Expr),
}

/// A parsed right-hand side is a `comparison` when it reduces to exactly
/// one value; anything with a binary operator anywhere inside is
/// `arithmetic`, and so is a bare value wrapped in parentheses at the top
/// level (`parenthesized`), since the parentheses themselves signal an
/// arithmetic intent even though `Expr` itself has no node to remember them.
fn classify_equals(expr: Expr, parenthesized: bool) -> EqualsShape {
    match expr {
        Expr::Col(c) if !parenthesized => EqualsShape::Comparison(Value::Col(c)),
        Expr::Number(n) if !parenthesized => EqualsShape::Comparison(Value::Number(n)),
        other => EqualsShape::Arithmetic(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Rule> {
        Parser::new(src, Line::new(1)).parse_rule()
    }

    #[test]
    fn plain_equals_is_comparison() {
        assert_eq!(
            parse("4C = 3C").unwrap(),
            Rule::Comparison {
                col: 4,
                op: CompareOp::Eq,
                value: Value::Col(3)
            }
        );
        assert_eq!(
            parse("4C = 500").unwrap(),
            Rule::Comparison {
                col: 4,
                op: CompareOp::Eq,
                value: Value::Number(500.0)
            }
        );
    }

    #[test]
    fn compound_equals_is_arithmetic() {
        let rule = parse("4C = 3C + 1").unwrap();
        assert_eq!(
            rule,
            Rule::Arithmetic {
                target: 4,
                expr: Expr::Binary(BinOp::Add, Box::new(Expr::Col(3)), Box::new(Expr::Number(1.0)))
            }
        );
    }

    #[test]
    fn parenthesized_equals_is_arithmetic_even_with_one_leaf() {
        let rule = parse("4C = (3C)").unwrap();
        assert!(matches!(rule, Rule::Arithmetic { .. }));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let rule = parse("4C = 1C + 2C * 3C").unwrap();
        match rule {
            Rule::Arithmetic { expr, .. } => {
                assert_eq!(
                    expr,
                    Expr::Binary(
                        BinOp::Add,
                        Box::new(Expr::Col(1)),
                        Box::new(Expr::Binary(BinOp::Mul, Box::new(Expr::Col(2)), Box::new(Expr::Col(3))))
                    )
                );
            }
            other => panic!("expected arithmetic, got {:?}", other),
        }
    }

    #[test]
    fn non_equals_comparison() {
        assert_eq!(
            parse("1C >= 18").unwrap(),
            Rule::Comparison {
                col: 1,
                op: CompareOp::GtEq,
                value: Value::Number(18.0)
            }
        );
    }

    #[test]
    fn datatype_rule() {
        assert_eq!(
            parse("6C IS NUMERIC").unwrap(),
            Rule::Datatype {
                col: 6,
                kind: DatatypeKind::Numeric
            }
        );
    }

    #[test]
    fn pattern_rule() {
        assert_eq!(
            parse("5C MATCHES \"^[A-Z]+$\"").unwrap(),
            Rule::Pattern {
                col: 5,
                op: PatternOp::Matches,
                text: "^[A-Z]+$".to_string()
            }
        );
    }

    #[test]
    fn range_rule() {
        assert_eq!(
            parse("2C BETWEEN 0 AND 100").unwrap(),
            Rule::Range { col: 2, min: 0.0, max: 100.0 }
        );
    }

    #[test]
    fn required_rule() {
        assert_eq!(parse("1C REQUIRED").unwrap(), Rule::Required { col: 1 });
    }

    #[test]
    fn missing_operand_is_an_error() {
        assert!(parse("1C =").is_err());
        assert!(matches!(
            parse("1C ="),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn unrecognized_shape_is_an_error() {
        assert!(parse("1C").is_err());
    }

    #[test]
    fn trailing_tokens_are_an_error() {
        assert!(matches!(
            parse("1C REQUIRED 2C"),
            Err(ParseError::TrailingTokens { .. })
        ));
    }

    #[test]
    fn between_requires_and() {
        assert!(parse("2C BETWEEN 0 100").is_err());
    }
}
