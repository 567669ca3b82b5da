//! Parser — recursive descent with one function per precedence level.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := power (('*' | '/') power)*
//! power      := primary ('^' power)?
//! primary    := NUMBER | VARIABLE | '(' expression ')'
//! ```
//!
//! `expression` and `term` loop over their operators and fold to the left,
//! so `a - b - c` is `(a - b) - c`. `power` recurses into itself for the
//! right operand instead, which makes `^` right-associative:
//! `2^3^2` is `2^(3^2)`.
//!
//! The parser holds a single cursor into the token vector and stops at the
//! first error. After the top-level expression the cursor must sit on the
//! `EndOfInput` sentinel, otherwise the leftover token is reported.

use log::debug;

use crate::ast::{BinOp, Expr};
use crate::errors::ParseError;
use crate::token::{Span, Token, TokenKind};

/// Parse a token stream (as produced by [`crate::lexer::tokenize`]).
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse one complete expression, consuming every token but the sentinel.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let expr = self.expression()?;

        if !self.is_at_end() {
            let token = self.advance_token();
            return Err(ParseError::TrailingToken {
                found: token.kind,
                span: token.span.into(),
            });
        }

        debug!("parsed {} ({} nodes)", expr, expr.node_count());
        Ok(expr)
    }

    // ── Precedence levels ────────────────────────────────────────────

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.term()?;
        while let Some(op) = self.match_operator(&[BinOp::Add, BinOp::Sub]) {
            let right = self.term()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.power()?;
        while let Some(op) = self.match_operator(&[BinOp::Mul, BinOp::Div]) {
            let right = self.power()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.primary()?;
        if self.match_operator(&[BinOp::Pow]).is_some() {
            // Recursing on `power` (not `primary`) gives right associativity.
            let exponent = self.power()?;
            return Ok(Expr::pow(base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd {
                span: self.current_span().into(),
            });
        }

        let token = self.advance_token();
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Variable(name) => Ok(Expr::Variable(name.to_string())),
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                self.expect_close_paren()?;
                Ok(inner)
            }
            found => Err(ParseError::ExpectedPrimary {
                found,
                span: token.span.into(),
            }),
        }
    }

    // ── Token manipulation ───────────────────────────────────────────

    /// Consume the current token if it is one of `ops`.
    fn match_operator(&mut self, ops: &[BinOp]) -> Option<BinOp> {
        match self.peek_kind() {
            Some(TokenKind::Operator(op)) if ops.contains(op) => {
                let op = *op;
                self.current += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn expect_close_paren(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek_kind(), Some(TokenKind::RightParen)) {
            self.current += 1;
            return Ok(());
        }
        Err(ParseError::MissingCloseParen {
            found: self
                .peek_kind()
                .cloned()
                .unwrap_or(TokenKind::EndOfInput),
            span: self.current_span().into(),
        })
    }

    fn advance_token(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        self.current += 1;
        token
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.current).map(|t| &t.kind)
    }

    fn current_span(&self) -> Span {
        match self.tokens.get(self.current) {
            Some(token) => token.span,
            // Stream without a sentinel: point just past the last token.
            None => self
                .tokens
                .last()
                .map(|t| Span::point(t.span.end))
                .unwrap_or_default(),
        }
    }

    /// At the sentinel, or past the end of a stream that lacks one.
    fn is_at_end(&self) -> bool {
        self.tokens
            .get(self.current)
            .map_or(true, |t| t.is_end())
    }
}
