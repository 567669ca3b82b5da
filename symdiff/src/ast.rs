//! Expression tree for arithmetic expressions.
//!
//! A tree is a closed sum of three node kinds: numeric literals, variables
//! and binary operations. Each `Binary` node owns both of its children, so
//! trees never share subtrees and never contain cycles. Every transformation
//! in this crate (differentiation, simplification) builds a new tree and
//! leaves its input untouched.
//!
//! Equality is structural: same variant, same operator, equal children.
//! Numbers compare with `f64` equality.

use std::fmt;

// ── Operators ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub const ALL: [BinOp; 5] = [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Pow];

    pub fn from_symbol(c: char) -> Option<BinOp> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '^' => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ── Expressions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal: `3.14`
    Number(f64),

    /// Unbound single-letter symbol: `x`
    Variable(String),

    /// Binary operation: `a + b`, `a ^ b`, etc.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Expr {
        Expr::Number(value)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Variable(name.into())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Div, left, right)
    }

    pub fn pow(left: Expr, right: Expr) -> Expr {
        Expr::binary(BinOp::Pow, left, right)
    }

    /// The literal value, if this node is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// True for a `Number` node holding exactly `value`.
    pub fn is_number(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Expr::Binary { .. })
    }

    /// Direct children, left first. Empty for leaves.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Number(_) | Expr::Variable(_) => Vec::new(),
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Height of the tree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Infix rendering, identical to `to_string()`.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

/// Integral values keep a trailing `.0` so literals read as floats.
/// Negative and non-finite values (`-3.0`, `inf`, `NaN`) only come out of
/// simplification and do not re-parse.
fn fmt_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        write!(f, "{:.1}", value)
    } else {
        write!(f, "{}", value)
    }
}

/// Every child that is itself a `Binary` node gets parentheses, whether or
/// not precedence requires them.
fn fmt_operand(f: &mut fmt::Formatter<'_>, operand: &Expr) -> fmt::Result {
    match operand {
        Expr::Binary { .. } => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

/// Fully parenthesized infix. Output of a parsed tree parses back to the
/// same tree; literals folded to `inf` or `NaN` do not re-parse.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => fmt_number(f, *n),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Binary { op, left, right } => {
                fmt_operand(f, left)?;
                write!(f, " {} ", op)?;
                fmt_operand(f, right)
            }
        }
    }
}
