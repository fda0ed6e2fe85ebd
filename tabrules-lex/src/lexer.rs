//! Tokenizes a single rule line.
//!
//! The grammar never needs more than one line of lookahead and a rule line
//! is always complete in memory, so the lexer runs eagerly: `Lexer::tokenize`
//! drains the whole line into a `Vec<Token>` terminated by `Token::Eof`
//! rather than exposing a streaming `Iterator`. Callers (the parser) index
//! into that vector directly.

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, NumberLit, Token};

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Tokenizes the whole line, always ending with `Token::Eof`.
    pub fn tokenize(source: &'a str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        while let Some(tok) = lexer.next_token() {
            tokens.push(tok);
        }
        tokens.push(Token::Eof);
        tokens
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.cursor.current_char(), ' ' | '\t' | '\r') {
            self.cursor.advance();
        }
    }

    /// Scans and returns the next token, or `None` at end of input.
    /// Characters that start no recognized token are silently skipped, per
    /// the tolerant scanning policy: the lexer always produces what it can
    /// rather than aborting on an unexpected character.
    fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            if self.cursor.is_at_end() {
                return None;
            }

            let c = self.cursor.current_char();
            if c.is_ascii_digit() {
                return Some(self.lex_number_or_col());
            }
            if c.is_ascii_alphabetic() || c == '_' {
                match self.lex_ident_or_col() {
                    Some(tok) => return Some(tok),
                    None => continue,
                }
            }
            if c == '"' {
                return Some(self.lex_string());
            }

            match c {
                '+' => {
                    self.cursor.advance();
                    return Some(Token::Plus);
                }
                '-' => {
                    self.cursor.advance();
                    return Some(Token::Minus);
                }
                '*' => {
                    self.cursor.advance();
                    return Some(Token::Star);
                }
                '/' => {
                    self.cursor.advance();
                    return Some(Token::Slash);
                }
                '(' => {
                    self.cursor.advance();
                    return Some(Token::LParen);
                }
                ')' => {
                    self.cursor.advance();
                    return Some(Token::RParen);
                }
                '=' => {
                    self.cursor.advance();
                    return Some(Token::Eq);
                }
                '!' => {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        return Some(Token::NotEq);
                    }
                    // A lone `!` names no token; skip and keep scanning.
                    continue;
                }
                '>' => {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        return Some(Token::GtEq);
                    }
                    return Some(Token::Gt);
                }
                '<' => {
                    self.cursor.advance();
                    if self.cursor.current_char() == '=' {
                        self.cursor.advance();
                        return Some(Token::LtEq);
                    }
                    return Some(Token::Lt);
                }
                _ => {
                    self.cursor.advance();
                    continue;
                }
            }
        }
    }

    /// Scans a run of digits, then decides between `COL`, an integer
    /// `NUMBER`, or a floating `NUMBER` by what follows.
    fn lex_number_or_col(&mut self) -> Token {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if matches!(self.cursor.current_char(), 'C' | 'c') {
            let digits = self.cursor.slice_from(start);
            self.cursor.advance();
            // `digits` is a non-empty run of ASCII digits; it always parses.
            let n: u32 = digits.parse().unwrap_or(0);
            return Token::Col(n);
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            let value: f64 = text.parse().unwrap_or(0.0);
            return Token::Number(NumberLit::Float(value));
        }

        let text = self.cursor.slice_from(start);
        let value: i64 = text.parse().unwrap_or(0);
        Token::Number(NumberLit::Int(value))
    }

    /// Scans a run of identifier characters and resolves it against the
    /// keyword table. Anything that is not a recognized keyword names no
    /// token in this grammar; the caller skips it and keeps scanning, same
    /// as a lone `!` or an unrecognized character.
    fn lex_ident_or_col(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_alphanumeric() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        keyword_from_ident(text)
    }

    /// Scans a double-quoted string literal. Quotes are stripped; there is
    /// no escape handling, so a `"` only ever closes the literal. An
    /// unterminated string consumes to end of line and yields whatever text
    /// followed the opening quote.
    fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote
        let start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '"' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start).to_string();
        if self.cursor.current_char() == '"' {
            self.cursor.advance();
        }
        Token::String(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut all = Lexer::tokenize(src);
        assert_eq!(all.pop(), Some(Token::Eof));
        all
    }

    #[test]
    fn lexes_column_reference() {
        assert_eq!(tokens("3C"), vec![Token::Col(3)]);
        assert_eq!(tokens("12c"), vec![Token::Col(12)]);
    }

    #[test]
    fn lexes_integer_and_float() {
        assert_eq!(tokens("42"), vec![Token::Number(NumberLit::Int(42))]);
        assert_eq!(tokens("3.5"), vec![Token::Number(NumberLit::Float(3.5))]);
    }

    #[test]
    fn trailing_dot_with_no_digit_stays_integer() {
        // `4.` has no digit after the dot, so the dot is not consumed here;
        // it is left for the next scan, which yields no token for a lone dot.
        assert_eq!(tokens("4."), vec![Token::Number(NumberLit::Int(4))]);
    }

    #[test]
    fn lexes_string_literal() {
        assert_eq!(
            tokens("\"hello world\""),
            vec![Token::String("hello world".to_string())]
        );
    }

    #[test]
    fn lexes_arithmetic_rule() {
        assert_eq!(
            tokens("4C = 3C + 1"),
            vec![
                Token::Col(4),
                Token::Eq,
                Token::Col(3),
                Token::Plus,
                Token::Number(NumberLit::Int(1)),
            ]
        );
    }

    #[test]
    fn lexes_range_rule() {
        assert_eq!(
            tokens("2C BETWEEN 0 AND 100"),
            vec![
                Token::Col(2),
                Token::Between,
                Token::Number(NumberLit::Int(0)),
                Token::And,
                Token::Number(NumberLit::Int(100)),
            ]
        );
    }

    #[test]
    fn lexes_not_eq_and_comparisons() {
        assert_eq!(tokens("1C != 2C"), vec![Token::Col(1), Token::NotEq, Token::Col(2)]);
        assert_eq!(tokens("1C >= 2"), vec![Token::Col(1), Token::GtEq, Token::Number(NumberLit::Int(2))]);
        assert_eq!(tokens("1C <= 2"), vec![Token::Col(1), Token::LtEq, Token::Number(NumberLit::Int(2))]);
    }

    #[test]
    fn skips_unknown_characters() {
        assert_eq!(tokens("1C @@ REQUIRED"), vec![Token::Col(1), Token::Required]);
    }

    #[test]
    fn keyword_lookup_is_case_insensitive_in_context() {
        assert_eq!(tokens("1c is required".to_uppercase().as_str()), tokens("1C IS REQUIRED"));
    }

    #[test]
    fn lone_bang_is_skipped() {
        assert_eq!(tokens("1C ! REQUIRED"), vec![Token::Col(1), Token::Required]);
    }

    #[test]
    fn test_property_arbitrary_column_digits() {
        use proptest::prelude::*;

        proptest!(|(digits in "[1-9][0-9]{0,8}")| {
            let source = format!("{}C", digits);
            let toks = tokens(&source);
            prop_assert_eq!(toks.len(), 1);
            prop_assert!(matches!(toks[0], Token::Col(_)));
        });
    }

    #[test]
    fn test_property_arbitrary_string_literal() {
        use proptest::prelude::*;

        proptest!(|(body in "[^\"\n]{0,64}")| {
            let source = format!("\"{}\"", body);
            let toks = tokens(&source);
            prop_assert_eq!(toks, vec![Token::String(body)]);
        });
    }
}
