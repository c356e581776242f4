//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. A rule never returns `Some` with a tree equal to its input; otherwise the
//! simplifier could not tell when it is done.

pub mod add;
pub mod divide;
pub mod fold;
pub mod inverse;
pub mod logic;
pub mod multiply;
pub mod power;

use symcalc_parser::parser::{ast::{Expr, Func}, token::op::BinOpKind};
use crate::symbolic::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a binary expression with the given operator, calls the given
/// transformation function with the left and right-hand-side.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_binary(
    expr: &Expr,
    op: BinOpKind,
    f: impl FnOnce(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Binary(target, lhs, rhs) if *target == op => f(lhs, rhs),
        _ => None,
    }
}

/// If the expression is a power expression, calls the given transformation function with the
/// base and exponent.
pub(crate) fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    do_binary(expr, BinOpKind::Exp, f)
}

/// If the expression is a call to the given builtin function, calls the given transformation
/// function with the arguments.
pub(crate) fn do_call(
    expr: &Expr,
    func: Func,
    f: impl FnOnce(&[Expr]) -> Option<Expr>,
) -> Option<Expr> {
    match expr {
        Expr::Func(target, args) if *target == func => f(args),
        _ => None,
    }
}

/// Returns true for literals that are not plain scalars: strings, vectors, matrices, and
/// quantities. Rules that reorder, combine, or cancel operands leave these alone, since `+` and
/// `*` are not commutative for all of them.
pub(crate) fn is_non_scalar_literal(expr: &Expr) -> bool {
    matches!(expr, Expr::Str(_) | Expr::Vector(_) | Expr::Matrix(_) | Expr::Quantity(..))
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold::all(expr, step_collector)
        .or_else(|| logic::all(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
        .or_else(|| divide::all(expr, step_collector))
        .or_else(|| inverse::all(expr, step_collector))
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| add::all(expr, step_collector))
}
