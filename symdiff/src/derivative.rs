//! Symbolic differentiation by structural recursion over the tree.
//!
//! Each node kind maps to one calculus rule. Sub-derivatives are computed
//! fresh at every use and subtrees of the input are cloned into the result,
//! so the output never shares structure with the input.
//!
//! | Input        | Derivative                                  |
//! |--------------|---------------------------------------------|
//! | c            | 0                                           |
//! | v            | 1 if v is the target variable, else 0       |
//! | f + g        | f' + g'                                     |
//! | f - g        | f' - g'                                     |
//! | f * g        | f' * g + f * g'                             |
//! | f / g        | (f' * g - f * g') / g ^ 2                   |
//! | f ^ n        | n * f ^ (n - 1) * f'   (n a numeric literal) |
//!
//! The result is not simplified; run [`crate::simplify::simplify`] on it.

use log::debug;

use crate::ast::{BinOp, Expr};
use crate::errors::DiffError;

/// Variable used when the caller does not name one.
pub const DEFAULT_VARIABLE: &str = "x";

/// Differentiate `expr` with respect to `variable`.
pub fn differentiate(expr: &Expr, variable: &str) -> Result<Expr, DiffError> {
    let result = derive(expr, variable)?;
    debug!("d/d{}({}) = {}", variable, expr, result);
    Ok(result)
}

fn derive(expr: &Expr, variable: &str) -> Result<Expr, DiffError> {
    match expr {
        Expr::Number(_) => Ok(Expr::number(0.0)),

        Expr::Variable(name) => Ok(Expr::number(if name == variable { 1.0 } else { 0.0 })),

        Expr::Binary { op, left, right } => match op {
            BinOp::Add => Ok(Expr::add(derive(left, variable)?, derive(right, variable)?)),

            BinOp::Sub => Ok(Expr::sub(derive(left, variable)?, derive(right, variable)?)),

            BinOp::Mul => {
                let d_left = derive(left, variable)?;
                let d_right = derive(right, variable)?;
                Ok(Expr::add(
                    Expr::mul(d_left, right.as_ref().clone()),
                    Expr::mul(left.as_ref().clone(), d_right),
                ))
            }

            BinOp::Div => {
                let d_left = derive(left, variable)?;
                let d_right = derive(right, variable)?;
                let numerator = Expr::sub(
                    Expr::mul(d_left, right.as_ref().clone()),
                    Expr::mul(left.as_ref().clone(), d_right),
                );
                let denominator = Expr::pow(right.as_ref().clone(), Expr::number(2.0));
                Ok(Expr::div(numerator, denominator))
            }

            BinOp::Pow => power_rule(left, right, variable),
        },
    }
}

/// d/dx(f^n) = n * f^(n-1) * f', for a literal exponent n.
fn power_rule(base: &Expr, exponent: &Expr, variable: &str) -> Result<Expr, DiffError> {
    let n = match exponent {
        Expr::Number(n) => *n,
        _ => {
            return Err(DiffError::UnsupportedOperation {
                exponent: exponent.clone(),
            })
        }
    };

    // The base is differentiated even when the exponent makes it
    // irrelevant, so an unsupported base still fails.
    let d_base = derive(base, variable)?;

    if n == 1.0 {
        Ok(d_base)
    } else if n == 0.0 {
        Ok(Expr::number(0.0))
    } else {
        let lowered = Expr::pow(base.clone(), Expr::number(n - 1.0));
        let coefficient = Expr::mul(Expr::number(n), lowered);
        Ok(Expr::mul(coefficient, d_base))
    }
}
