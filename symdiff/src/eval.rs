//! Numeric evaluation of an expression tree.

use std::collections::HashMap;

use crate::ast::{BinOp, Expr};
use crate::errors::EvalError;

/// Variable values for [`evaluate`], keyed by name.
pub type Bindings = HashMap<String, f64>;

/// Compute the value of `expr`, looking variables up in `bindings`.
///
/// Both operands of a binary node are evaluated, left first, before the
/// operator is applied. Only `/` checks its right operand: a divisor equal
/// to zero fails with [`EvalError::DivisionByZero`]. `^` follows `f64::powf`,
/// so a negative base with a fractional exponent gives NaN.
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),

        Expr::Variable(name) => bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }),

        Expr::Binary { op, left, right } => {
            let a = evaluate(left, bindings)?;
            let b = evaluate(right, bindings)?;
            match op {
                BinOp::Add => Ok(a + b),
                BinOp::Sub => Ok(a - b),
                BinOp::Mul => Ok(a * b),
                BinOp::Div => {
                    if b == 0.0 {
                        Err(EvalError::DivisionByZero)
                    } else {
                        Ok(a / b)
                    }
                }
                BinOp::Pow => Ok(a.powf(b)),
            }
        }
    }
}
