//! symdiff — Parse, differentiate and simplify arithmetic expressions.
//!
//! # Pipeline
//!
//! ```text
//! Expression text ("(x + 1)^2")
//!     │
//!     ▼
//! ┌────────────┐
//! │  Lexer      │  Numbers, single-letter variables, + - * / ^, parentheses
//! └────┬───────┘
//!      │
//!      ▼
//! ┌────────────┐
//! │  Parser     │  Recursive descent, one function per precedence level
//! └────┬───────┘
//!      │
//!      ▼
//! ┌────────────┐      ┌────────────┐
//! │ Derivative  │ ───▶ │ Simplifier  │  Single bottom-up rewriting pass
//! └────────────┘      └────────────┘
//!
//!   (any tree) ───▶ Evaluator ───▶ f64
//! ```
//!
//! Every stage is a pure function: trees are never mutated, and each
//! transformation returns a new tree. Recursion depth follows the nesting
//! depth of the input, so pathologically deep input can exhaust the stack.
//!
//! ```
//! use symdiff::{derivative, evaluate_str, Bindings};
//!
//! let d = derivative("x^2 + 3*x", "x").unwrap();
//! assert_eq!(d.to_string(), "(2.0 * x) + 3.0");
//!
//! let bindings = Bindings::from([("x".to_string(), 3.0)]);
//! assert_eq!(evaluate_str("x^2", &bindings).unwrap(), 9.0);
//! ```

pub mod ast;
pub mod derivative;
pub mod errors;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod simplify;
pub mod token;

#[cfg(test)]
mod tests;

pub use ast::{BinOp, Expr};
pub use derivative::{differentiate, DEFAULT_VARIABLE};
pub use errors::{DiffError, Error, EvalError, LexError, ParseError};
pub use eval::{evaluate, Bindings};
pub use lexer::tokenize;
pub use parser::parse;
pub use simplify::simplify;
pub use token::{Span, Token, TokenKind};

/// Tokenize and parse `text` into an expression tree.
pub fn parse_expression(text: &str) -> Result<Expr, Error> {
    let tokens = tokenize(text)?;
    Ok(parse(tokens)?)
}

/// Parse `text`, differentiate it with respect to `variable`, and simplify.
pub fn derivative(text: &str, variable: &str) -> Result<Expr, Error> {
    let expr = parse_expression(text)?;
    let raw = differentiate(&expr, variable)?;
    Ok(simplify(&raw))
}

/// Parse `text` and evaluate it under `bindings`.
pub fn evaluate_str(text: &str, bindings: &Bindings) -> Result<f64, Error> {
    let expr = parse_expression(text)?;
    Ok(evaluate(&expr, bindings)?)
}

/// Infix rendering of `expr`; every operand that is itself an operation is
/// parenthesized.
pub fn to_display_string(expr: &Expr) -> String {
    expr.to_display_string()
}
