//! Cancellation of a function applied to its own inverse.
//!
//! Only the direction that holds for every input is applied: `sin(asin(x)) = x` for every `x` in
//! the domain of `asin`, but `asin(sin(x)) = x` only for `x` in `[-pi/2, pi/2]`.

use symcalc_parser::parser::{ast::{Expr, Func}, token::op::BinOpKind};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};
use super::{do_call, do_power};

/// Returns true if the expression is Euler's number.
fn is_e(expr: &Expr) -> bool {
    matches!(expr, Expr::Symbol(name) if name == "e")
}

/// `sin(asin(x)) = x`
/// `exp(ln(x)) = x`
/// `ln(exp(x)) = x`
pub fn inverse_function(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Func(outer, args) = expr else {
        return None;
    };
    let [Expr::Func(inner, inner_args)] = args.as_slice() else {
        return None;
    };
    let [arg] = inner_args.as_slice() else {
        return None;
    };
    if outer.inverse() != Some(*inner) {
        return None;
    }

    step_collector.push(Step::InverseFunction);
    Some(arg.clone())
}

/// `ln(e^x) = x`
pub fn ln_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_call(expr, Func::Ln, |args| match args {
        [Expr::Binary(BinOpKind::Exp, base, exponent)] if is_e(base) => Some((**exponent).clone()),
        _ => None,
    })?;

    step_collector.push(Step::InverseFunction);
    Some(opt)
}

/// `e^ln(x) = x`
pub fn power_of_ln(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |lhs, rhs| match rhs {
        Expr::Func(Func::Ln, args) if is_e(lhs) => match args.as_slice() {
            [arg] => Some(arg.clone()),
            _ => None,
        },
        _ => None,
    })?;

    step_collector.push(Step::InverseFunction);
    Some(opt)
}

/// Applies all inverse function rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    inverse_function(expr, step_collector)
        .or_else(|| ln_of_power(expr, step_collector))
        .or_else(|| power_of_ln(expr, step_collector))
}
