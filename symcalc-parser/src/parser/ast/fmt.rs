//! Formatting of expressions back into source text.
//!
//! The output can be parsed again into an expression that evaluates to the same value.
//! Parentheses are only inserted where the precedence or associativity of an operator requires
//! them.

use crate::parser::{
    ast::expr::Expr,
    token::op::BinOpKind,
    Associativity,
    Precedence,
};
use std::fmt::{Display, Formatter, Result};

impl Expr {
    /// Returns the precedence the expression has when it appears as an operand, or [`None`] if the
    /// expression is atomic and never needs parentheses.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Expr::Number(n) | Expr::Quantity(n, _) if n.is_sign_negative() && *n != 0.0 => {
                Some(Precedence::Neg)
            },
            Expr::Unary(op, _) => Some(op.precedence()),
            Expr::Binary(op, ..) => Some(op.precedence()),
            Expr::Assign(..) | Expr::FuncDef(..) => Some(Precedence::Assign),
            _ => None,
        }
    }
}

/// Writes an operand, surrounding it with parentheses if `needs_parens` returns true for its
/// precedence.
fn fmt_operand(
    f: &mut Formatter,
    operand: &Expr,
    needs_parens: impl FnOnce(Precedence) -> bool,
) -> Result {
    match operand.precedence() {
        Some(precedence) if needs_parens(precedence) => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

/// Writes a comma-separated list of items.
fn fmt_list<T: Display>(f: &mut Formatter, items: impl IntoIterator<Item = T>) -> Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Str(s) => write!(f, "\"{}\"", s),
            Expr::Quantity(n, unit) => write!(f, "{} {}", n, unit),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Vector(elems) => {
                write!(f, "{{")?;
                fmt_list(f, elems)?;
                write!(f, "}}")
            },
            Expr::Matrix(rows) => {
                write!(f, "{{")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{{")?;
                    fmt_list(f, row)?;
                    write!(f, "}}")?;
                }
                write!(f, "}}")
            },
            Expr::Unary(op, operand) => {
                let precedence = op.precedence();
                match op.associativity() {
                    Associativity::Left => {
                        // `(-3)!`, `(x + 1)!`; only atoms and other factorials go bare
                        let bare = matches!(operand.precedence(), None | Some(Precedence::Factorial));
                        if bare {
                            write!(f, "{}{}", operand, op.symbol())
                        } else {
                            write!(f, "({}){}", operand, op.symbol())
                        }
                    },
                    Associativity::Right => {
                        write!(f, "{}", op.symbol())?;
                        fmt_operand(f, operand, |inner| inner <= precedence)
                    },
                }
            },
            Expr::Binary(op, lhs, rhs) => {
                let precedence = op.precedence();
                let associativity = op.associativity();
                fmt_operand(f, lhs, |inner| {
                    inner < precedence || inner == precedence && associativity == Associativity::Right
                })?;
                if *op == BinOpKind::Exp {
                    write!(f, "{}", op.symbol())?;
                } else {
                    write!(f, " {} ", op.symbol())?;
                }
                fmt_operand(f, rhs, |inner| {
                    inner < precedence || inner == precedence && associativity == Associativity::Left
                })
            },
            Expr::Func(func, args) => {
                write!(f, "{}(", func)?;
                fmt_list(f, args)?;
                write!(f, ")")
            },
            Expr::Call(name, args) => {
                write!(f, "{}(", name)?;
                fmt_list(f, args)?;
                write!(f, ")")
            },
            Expr::If(condition, then, otherwise) => write!(f, "if({}, {}, {})", condition, then, otherwise),
            Expr::Convert(value, unit) => write!(f, "convert({}, {})", value, unit),
            Expr::Assign(name, value) => write!(f, "{} = {}", name, value),
            Expr::FuncDef(name, params, body) => {
                write!(f, "{}(", name)?;
                fmt_list(f, params)?;
                write!(f, ") = {}", body)
            },
            Expr::Summation(var, from, to, body) => write!(f, "summation({}, {}, {}, {})", var, from, to, body),
            Expr::Product(var, from, to, body) => write!(f, "product({}, {}, {}, {})", var, from, to, body),
        }
    }
}
