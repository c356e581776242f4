//! Simplification rules for division.

use symcalc_parser::parser::{ast::Expr, token::op::BinOpKind};
use crate::{
    funcs::{combinatoric::gcd, MAX_EXACT_INTEGER},
    symbolic::{simplify::step::Step, step_collector::StepCollector},
};
use super::{do_binary, is_non_scalar_literal};

/// If the expression is a division, calls the given transformation function with the numerator
/// and denominator.
fn do_divide(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    do_binary(expr, BinOpKind::Div, f)
}

/// `a/1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| rhs.is_number(1.0).then(|| lhs.clone()))?;
    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `0/a = 0`
///
/// Division by a literal zero is left alone so that executing the tree still reports it.
pub fn divide_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        if lhs.is_number(0.0) && !rhs.is_number(0.0) && !is_non_scalar_literal(rhs) {
            Some(Expr::Number(0.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::DivideZero);
    Some(opt)
}

/// `a/a = 1`
pub fn divide_self(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        if lhs == rhs && !lhs.is_literal() && !is_non_scalar_literal(lhs) {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::DivideSelf);
    Some(opt)
}

/// `6/4 = 3/2`
/// `3/-4 = -3/4`
///
/// Fractions that divide evenly are folded to an integer by the folding rules instead.
pub fn reduce_fraction(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        let (num, den) = (lhs.as_number()?, rhs.as_number()?);
        let exact = |n: f64| n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER;
        if !exact(num) || !exact(den) || den == 0.0 {
            return None;
        }

        let divisor = gcd(&[num as i64, den as i64]) as f64 * den.signum();
        if divisor == 1.0 || divisor == 0.0 {
            return None;
        }
        Some(Expr::binary(
            BinOpKind::Div,
            Expr::Number(num / divisor + 0.0),
            Expr::Number(den / divisor),
        ))
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Applies all division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    divide_one(expr, step_collector)
        .or_else(|| divide_zero(expr, step_collector))
        .or_else(|| divide_self(expr, step_collector))
        .or_else(|| reduce_fraction(expr, step_collector))
}
