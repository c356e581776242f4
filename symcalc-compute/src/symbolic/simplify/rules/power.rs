//! Simplification rules for power expressions.

use symcalc_parser::parser::{ast::Expr, token::op::BinOpKind};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};
use super::{do_power, is_non_scalar_literal};

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, matching what the executor computes.
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_number(0.0) && !is_non_scalar_literal(lhs) {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `FnOnce`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_number(1.0) {
            Some(Expr::Number(1.0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_number(1.0) && !is_non_scalar_literal(lhs) {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`
///
/// Only applies when `b` and `c` are numbers and `c` is an integer, since `(a^2)^(1/2)` is `|a|`,
/// not `a`.
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| {
        let outer = rhs.as_number()?;
        if outer.fract() != 0.0 {
            return None;
        }
        let Expr::Binary(BinOpKind::Exp, base, inner) = lhs else {
            return None;
        };
        let inner = inner.as_number()?;
        Some(Expr::binary(BinOpKind::Exp, (**base).clone(), Expr::Number(inner * outer)))
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
}
