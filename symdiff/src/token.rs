//! Token types for arithmetic expressions.
//!
//! Each token carries its kind and a span indicating its position in the
//! source. Spans let errors underline the exact characters that caused
//! them.

use std::fmt;

use crate::ast::BinOp;

/// Byte offset range in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `at`.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Every token the lexer can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, always floating point.
    Number(f64),
    /// Single-letter variable name.
    Variable(char),
    /// One of `+ - * / ^`.
    Operator(BinOp),
    LeftParen,
    RightParen,
    /// Sentinel, always the last token of a lex pass.
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "NUMBER({})", n),
            TokenKind::Variable(c) => write!(f, "VARIABLE({})", c),
            TokenKind::Operator(op) => write!(f, "OPERATOR({})", op),
            TokenKind::LeftParen => write!(f, "LPAREN"),
            TokenKind::RightParen => write!(f, "RPAREN"),
            TokenKind::EndOfInput => write!(f, "EOF"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
