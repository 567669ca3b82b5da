//! Lexer — Tokenizes arithmetic expressions.
//!
//! The lexer scans the source string character by character, producing a
//! vector of tokens that always ends with [`TokenKind::EndOfInput`].
//!
//! - **Fail fast**: the first character that cannot start a token aborts
//!   the scan with a [`LexError`] carrying the character and its byte
//!   offset. There is no partial token stream.
//!
//! - **Numbers**: a digit or `.` starts a literal, and the scanner greedily
//!   takes every following digit and `.`. The captured text is then handed
//!   to `f64` parsing, so `1.2.3` surfaces as an invalid number rather than
//!   as two literals.
//!
//! - **Minus is always an operator**: a number is only ever entered on a
//!   digit or `.`, so `-` is emitted as [`BinOp::Sub`] everywhere, including
//!   in front of a literal. `-2` therefore does not parse on its own.
//!
//! - **One letter per variable**: `xy` lexes as `x` followed by `y`, with no
//!   implied multiplication between them.

use log::{debug, trace};

use crate::ast::BinOp;
use crate::errors::LexError;
use crate::token::{Span, Token, TokenKind};

/// Convert `source` into tokens, terminated by `EndOfInput`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).scan_tokens()?;
    debug!("lexed {} tokens from {:?}", tokens.len(), source);
    Ok(tokens)
}

pub struct Lexer {
    chars: Vec<char>,
    start: usize,    // Start of current token (byte offset)
    current: usize,  // Current position (char index)
    byte_pos: usize, // Current byte position
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            byte_pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn scan_tokens(mut self) -> Result<Vec<Token>, LexError> {
        while !self.is_at_end() {
            self.start = self.byte_pos;
            self.scan_token()?;
        }
        self.tokens.push(Token::new(
            TokenKind::EndOfInput,
            Span::point(self.byte_pos),
        ));
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), LexError> {
        let c = self.advance();
        match c {
            c if c.is_whitespace() => {}

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),

            c if c.is_ascii_digit() || c == '.' => self.number(c)?,

            c if c.is_alphabetic() => self.add_token(TokenKind::Variable(c)),

            c => match BinOp::from_symbol(c) {
                Some(op) => self.add_token(TokenKind::Operator(op)),
                None => {
                    return Err(LexError::invalid_character(
                        c,
                        Span::new(self.start, self.byte_pos),
                    ))
                }
            },
        }
        Ok(())
    }

    fn number(&mut self, first: char) -> Result<(), LexError> {
        let mut s = String::new();
        s.push(first);
        while !self.is_at_end() && (self.peek().is_ascii_digit() || self.peek() == '.') {
            s.push(self.advance());
        }

        match s.parse::<f64>() {
            Ok(n) => {
                self.add_token(TokenKind::Number(n));
                Ok(())
            }
            Err(_) => Err(LexError::invalid_number(
                s,
                Span::new(self.start, self.byte_pos),
            )),
        }
    }

    // ── Character-level helpers ──────────────────────────────────────

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.byte_pos += c.len_utf8();
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn add_token(&mut self, kind: TokenKind) {
        trace!("token {} at {}..{}", kind, self.start, self.byte_pos);
        self.tokens.push(Token::new(kind, Span::new(self.start, self.byte_pos)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("lex errors")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("42"), vec![TokenKind::Number(42.0), TokenKind::EndOfInput]);
        assert_eq!(lex("2.75"), vec![TokenKind::Number(2.75), TokenKind::EndOfInput]);
        assert_eq!(lex(".5"), vec![TokenKind::Number(0.5), TokenKind::EndOfInput]);
        assert_eq!(lex("2."), vec![TokenKind::Number(2.0), TokenKind::EndOfInput]);
    }

    #[test]
    fn test_expression() {
        assert_eq!(
            lex("2*x + 3"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Operator(BinOp::Mul),
                TokenKind::Variable('x'),
                TokenKind::Operator(BinOp::Add),
                TokenKind::Number(3.0),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_parens_and_power() {
        assert_eq!(
            lex("(x + 1)^2"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Variable('x'),
                TokenKind::Operator(BinOp::Add),
                TokenKind::Number(1.0),
                TokenKind::RightParen,
                TokenKind::Operator(BinOp::Pow),
                TokenKind::Number(2.0),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_minus_is_always_an_operator() {
        assert_eq!(
            lex("-2"),
            vec![
                TokenKind::Operator(BinOp::Sub),
                TokenKind::Number(2.0),
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(
            lex("x-1"),
            vec![
                TokenKind::Variable('x'),
                TokenKind::Operator(BinOp::Sub),
                TokenKind::Number(1.0),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_adjacent_letters_are_separate_variables() {
        assert_eq!(
            lex("xy"),
            vec![
                TokenKind::Variable('x'),
                TokenKind::Variable('y'),
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(lex(""), vec![TokenKind::EndOfInput]);
        assert_eq!(lex("   \t"), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("  x + 10").unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 3));
        assert_eq!(tokens[2].span, Span::new(6, 8));
        assert_eq!(tokens[3].span, Span::point(8));
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("2 & 3").unwrap_err();
        assert_eq!(
            err,
            LexError::invalid_character('&', Span::new(2, 3))
        );
        assert!(err.to_string().contains('&'));
    }

    #[test]
    fn test_invalid_character_after_multibyte() {
        let err = tokenize("é $").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharacter { ch: '$', offset: 3, .. }));
    }

    #[test]
    fn test_malformed_number() {
        let err = tokenize("1.2.3 + x").unwrap_err();
        assert_eq!(err, LexError::invalid_number("1.2.3", Span::new(0, 5)));

        let err = tokenize("x * .").unwrap_err();
        assert!(matches!(err, LexError::InvalidNumber { offset: 4, .. }));
    }
}
