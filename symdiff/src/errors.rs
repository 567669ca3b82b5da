//! Error reporting with source spans.
//!
//! Every stage of the pipeline has its own error type. All of them derive
//! miette's `Diagnostic`, so a front end can attach the input text with
//! `Report::with_source_code` and get the offending characters underlined.
//! Spans are byte offsets into the text handed to the lexer.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Expr;
use crate::token::{Span, TokenKind};

/// The lexer met something that cannot start a token.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum LexError {
    #[error("invalid character '{ch}' at position {offset}")]
    #[diagnostic(
        code(symdiff::lex::invalid_character),
        help("expressions may contain numbers, single-letter variables, + - * / ^ and parentheses")
    )]
    InvalidCharacter {
        ch: char,
        offset: usize,
        #[label("not allowed here")]
        span: SourceSpan,
    },

    #[error("invalid number '{literal}' at position {offset}")]
    #[diagnostic(code(symdiff::lex::invalid_number))]
    InvalidNumber {
        literal: String,
        offset: usize,
        #[label("malformed literal")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn invalid_character(ch: char, span: Span) -> Self {
        LexError::InvalidCharacter {
            ch,
            offset: span.start,
            span: span.into(),
        }
    }

    pub fn invalid_number(literal: impl Into<String>, span: Span) -> Self {
        LexError::InvalidNumber {
            literal: literal.into(),
            offset: span.start,
            span: span.into(),
        }
    }

    /// Byte offset of the offending input.
    pub fn offset(&self) -> usize {
        match self {
            LexError::InvalidCharacter { offset, .. } | LexError::InvalidNumber { offset, .. } => {
                *offset
            }
        }
    }
}

/// The token stream does not match the expression grammar.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ParseError {
    #[error("no tokens to parse")]
    #[diagnostic(code(symdiff::parse::empty))]
    Empty,

    #[error("unexpected end of input")]
    #[diagnostic(
        code(symdiff::parse::unexpected_end),
        help("an operator must be followed by a number, a variable or '('")
    )]
    UnexpectedEnd {
        #[label("expression ends here")]
        span: SourceSpan,
    },

    #[error("expected number, variable, or '(', found {found}")]
    #[diagnostic(code(symdiff::parse::expected_primary))]
    ExpectedPrimary {
        found: TokenKind,
        #[label("expected an operand")]
        span: SourceSpan,
    },

    #[error("expected ')' after expression, found {found}")]
    #[diagnostic(code(symdiff::parse::missing_paren))]
    MissingCloseParen {
        found: TokenKind,
        #[label("expected ')'")]
        span: SourceSpan,
    },

    #[error("unexpected token {found} after complete expression")]
    #[diagnostic(
        code(symdiff::parse::trailing_token),
        help("adjacent operands need an explicit operator, e.g. 'x*y' rather than 'xy'")
    )]
    TrailingToken {
        found: TokenKind,
        #[label("unexpected token")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// The token that stopped the parse, when there was one.
    pub fn token(&self) -> Option<&TokenKind> {
        match self {
            ParseError::Empty => None,
            ParseError::UnexpectedEnd { .. } => Some(&TokenKind::EndOfInput),
            ParseError::ExpectedPrimary { found, .. }
            | ParseError::MissingCloseParen { found, .. }
            | ParseError::TrailingToken { found, .. } => Some(found),
        }
    }
}

/// A derivative rule that is deliberately not implemented.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DiffError {
    #[error(
        "unsupported operation: derivative with exponent '{exponent}' requires \
         logarithmic differentiation, not implemented"
    )]
    #[diagnostic(
        code(symdiff::diff::unsupported),
        help("only constant numeric exponents can be differentiated")
    )]
    UnsupportedOperation { exponent: Expr },
}

/// Numeric evaluation failed.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum EvalError {
    #[error("variable '{name}' not defined")]
    #[diagnostic(code(symdiff::eval::undefined_variable))]
    UndefinedVariable { name: String },

    #[error("division by zero")]
    #[diagnostic(code(symdiff::eval::division_by_zero))]
    DivisionByZero,
}

/// Any failure of the composed pipeline.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = LexError::invalid_character('&', Span::new(2, 3));
        assert_eq!(err.to_string(), "invalid character '&' at position 2");
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_parse_error_token() {
        let err = ParseError::MissingCloseParen {
            found: TokenKind::EndOfInput,
            span: Span::point(6).into(),
        };
        assert_eq!(err.token(), Some(&TokenKind::EndOfInput));
        assert_eq!(ParseError::Empty.token(), None);
    }

    #[test]
    fn test_wrapped_error_is_transparent() {
        let err: Error = EvalError::UndefinedVariable { name: "y".into() }.into();
        assert_eq!(err.to_string(), "variable 'y' not defined");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("symdiff::eval::undefined_variable".to_string())
        );
    }
}
