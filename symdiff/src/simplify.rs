//! Bottom-up algebraic simplification.
//!
//! Children are simplified first, then one rule is tried at the parent.
//! A rewritten node is not simplified again, so the pass runs exactly once
//! over the tree rather than iterating to a fixpoint. Rules, checked in
//! order within each operator:
//!
//! ```text
//! +   x + 0 -> x     0 + x -> x     c + c -> c
//! -   x - 0 -> x     0 - x kept     c - c -> c
//! *   x * 0 -> 0     0 * x -> 0     x * 1 -> x     1 * x -> x     c * c -> c
//! /   x / 1 -> x     0 / x -> 0     c / c -> c
//! ^   x ^ 1 -> x     x ^ 0 -> 1     c ^ c -> c
//! ```
//!
//! `0 - x` is left alone because there is no unary negation node, and it
//! is checked before constant folding, so `0 - 3` stays as written.
//! `0 / x` and `x ^ 0` fire even when `x` is zero: division safety is an
//! evaluation concern.

use log::{debug, trace};

use crate::ast::{BinOp, Expr};

/// Return a simplified copy of `expr`.
pub fn simplify(expr: &Expr) -> Expr {
    let result = simplify_node(expr);
    debug!(
        "simplified {} nodes to {}: {}",
        expr.node_count(),
        result.node_count(),
        result
    );
    result
}

fn simplify_node(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(_) | Expr::Variable(_) => expr.clone(),
        Expr::Binary { op, left, right } => {
            let left = simplify_node(left);
            let right = simplify_node(right);
            rewrite(*op, left, right)
        }
    }
}

/// Apply the first matching rule for `op` to already-simplified operands.
fn rewrite(op: BinOp, left: Expr, right: Expr) -> Expr {
    let folded = match op {
        BinOp::Add => rewrite_add(&left, &right),
        BinOp::Sub => rewrite_sub(&left, &right),
        BinOp::Mul => rewrite_mul(&left, &right),
        BinOp::Div => rewrite_div(&left, &right),
        BinOp::Pow => rewrite_pow(&left, &right),
    };

    match folded {
        Some(Rewrite::Left) => {
            trace!("{} {} {} -> {}", left, op, right, left);
            left
        }
        Some(Rewrite::Right) => {
            trace!("{} {} {} -> {}", left, op, right, right);
            right
        }
        Some(Rewrite::Constant(value)) => {
            trace!("{} {} {} -> {}", left, op, right, value);
            Expr::Number(value)
        }
        None => Expr::binary(op, left, right),
    }
}

/// Outcome of a rule that fired.
enum Rewrite {
    Left,
    Right,
    Constant(f64),
}

fn both_numbers(left: &Expr, right: &Expr) -> Option<(f64, f64)> {
    Some((left.as_number()?, right.as_number()?))
}

fn rewrite_add(left: &Expr, right: &Expr) -> Option<Rewrite> {
    if right.is_number(0.0) {
        return Some(Rewrite::Left);
    }
    if left.is_number(0.0) {
        return Some(Rewrite::Right);
    }
    both_numbers(left, right).map(|(a, b)| Rewrite::Constant(a + b))
}

fn rewrite_sub(left: &Expr, right: &Expr) -> Option<Rewrite> {
    if right.is_number(0.0) {
        return Some(Rewrite::Left);
    }
    if left.is_number(0.0) {
        return None;
    }
    both_numbers(left, right).map(|(a, b)| Rewrite::Constant(a - b))
}

fn rewrite_mul(left: &Expr, right: &Expr) -> Option<Rewrite> {
    if left.is_number(0.0) || right.is_number(0.0) {
        return Some(Rewrite::Constant(0.0));
    }
    if right.is_number(1.0) {
        return Some(Rewrite::Left);
    }
    if left.is_number(1.0) {
        return Some(Rewrite::Right);
    }
    both_numbers(left, right).map(|(a, b)| Rewrite::Constant(a * b))
}

fn rewrite_div(left: &Expr, right: &Expr) -> Option<Rewrite> {
    if right.is_number(1.0) {
        return Some(Rewrite::Left);
    }
    if left.is_number(0.0) {
        return Some(Rewrite::Constant(0.0));
    }
    both_numbers(left, right).map(|(a, b)| Rewrite::Constant(a / b))
}

fn rewrite_pow(left: &Expr, right: &Expr) -> Option<Rewrite> {
    if right.is_number(1.0) {
        return Some(Rewrite::Left);
    }
    if right.is_number(0.0) {
        return Some(Rewrite::Constant(1.0));
    }
    both_numbers(left, right).map(|(a, b)| Rewrite::Constant(a.powf(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn n(value: f64) -> Expr {
        Expr::number(value)
    }

    #[test]
    fn test_leaves_unchanged() {
        assert_eq!(simplify(&n(4.0)), n(4.0));
        assert_eq!(simplify(&x()), x());
    }

    #[test]
    fn test_additive_identity() {
        assert_eq!(simplify(&Expr::add(x(), n(0.0))), x());
        assert_eq!(simplify(&Expr::add(n(0.0), x())), x());
        assert_eq!(simplify(&Expr::add(n(2.0), n(3.0))), n(5.0));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(simplify(&Expr::sub(x(), n(0.0))), x());
        assert_eq!(simplify(&Expr::sub(n(0.0), x())), Expr::sub(n(0.0), x()));
        assert_eq!(simplify(&Expr::sub(n(5.0), n(3.0))), n(2.0));
        // Zero on the left wins over constant folding.
        assert_eq!(simplify(&Expr::sub(n(0.0), n(3.0))), Expr::sub(n(0.0), n(3.0)));
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(simplify(&Expr::mul(x(), n(0.0))), n(0.0));
        assert_eq!(simplify(&Expr::mul(n(0.0), x())), n(0.0));
        assert_eq!(simplify(&Expr::mul(x(), n(1.0))), x());
        assert_eq!(simplify(&Expr::mul(n(1.0), x())), x());
        assert_eq!(simplify(&Expr::mul(n(3.0), n(4.0))), n(12.0));
    }

    #[test]
    fn test_division() {
        assert_eq!(simplify(&Expr::div(x(), n(1.0))), x());
        assert_eq!(simplify(&Expr::div(n(0.0), x())), n(0.0));
        // No divide-by-zero guard here.
        assert_eq!(simplify(&Expr::div(n(0.0), n(0.0))), n(0.0));
        assert_eq!(simplify(&Expr::div(n(1.0), n(0.0))), n(f64::INFINITY));
        assert_eq!(simplify(&Expr::div(n(3.0), n(4.0))), n(0.75));
        assert_eq!(simplify(&Expr::div(x(), n(2.0))), Expr::div(x(), n(2.0)));
    }

    #[test]
    fn test_power() {
        assert_eq!(simplify(&Expr::pow(x(), n(1.0))), x());
        assert_eq!(simplify(&Expr::pow(x(), n(0.0))), n(1.0));
        assert_eq!(simplify(&Expr::pow(n(0.0), n(0.0))), n(1.0));
        assert_eq!(simplify(&Expr::pow(n(2.0), n(10.0))), n(1024.0));
    }

    #[test]
    fn test_bottom_up_folding() {
        // 0 + (2*1) => 2
        let expr = Expr::add(n(0.0), Expr::mul(n(2.0), n(1.0)));
        assert_eq!(simplify(&expr), n(2.0));

        // ((0 * x) + (2 * 1)) + 0 => 2
        let expr = Expr::add(
            Expr::add(Expr::mul(n(0.0), x()), Expr::mul(n(2.0), n(1.0))),
            n(0.0),
        );
        assert_eq!(simplify(&expr), n(2.0));
    }

    #[test]
    fn test_derivative_of_square() {
        // (2 * x^1) * 1 => 2 * x
        let expr = Expr::mul(Expr::mul(n(2.0), Expr::pow(x(), n(1.0))), n(1.0));
        assert_eq!(simplify(&expr), Expr::mul(n(2.0), x()));
    }

    #[test]
    fn test_single_pass_does_not_reassociate() {
        // (2 * x) * 3 has no constant pair at any single node.
        let expr = Expr::mul(Expr::mul(n(2.0), x()), n(3.0));
        assert_eq!(simplify(&expr), expr);
    }

    #[test]
    fn test_idempotent_on_examples() {
        let exprs = [
            Expr::sub(n(0.0), Expr::mul(x(), n(1.0))),
            Expr::add(Expr::div(n(0.0), x()), Expr::pow(x(), n(2.0))),
            Expr::mul(Expr::add(x(), n(0.0)), Expr::sub(n(4.0), n(1.0))),
        ];
        for expr in &exprs {
            let once = simplify(expr);
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let expr = Expr::add(x(), n(0.0));
        let before = expr.clone();
        let _ = simplify(&expr);
        assert_eq!(expr, before);
    }
}
