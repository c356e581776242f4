//! Folding of operations whose operands are all literals.
//!
//! Folding goes through the same operator tables the executor uses, so a folded tree evaluates
//! to exactly what the original would have. Operations that fail are left alone, so that the
//! error is still reported when the tree is executed.

use symcalc_parser::parser::{ast::Expr, token::op::BinOpKind};
use symcalc_unit_convert::Measurement;
use crate::{
    eval::{binary::eval_binary, unary::eval_unary},
    funcs,
    symbolic::{simplify::step::Step, step_collector::StepCollector},
    trig_mode::TrigMode,
    value::Value,
};

/// Returns the value a literal evaluates to.
fn literal_value(expr: &Expr) -> Option<Value> {
    match expr {
        Expr::Number(n) => Some(Value::Number(*n)),
        Expr::Boolean(b) => Some(Value::Boolean(*b)),
        Expr::Str(s) => Some(Value::Str(s.clone())),
        Expr::Quantity(n, unit) => Some(Measurement::new(*n, *unit).into()),
        _ => None,
    }
}

/// Converts a folded value back into a literal. Non-finite numbers have no literal syntax and are
/// not folded.
fn into_literal(value: Value) -> Option<Expr> {
    match value {
        // `-0` folds to `0`
        Value::Number(n) if n.is_finite() => Some(Expr::Number(n + 0.0)),
        Value::Quantity(m) if m.value.is_finite() => Some(Expr::Quantity(m.value + 0.0, m.unit)),
        value @ (Value::Boolean(_) | Value::Str(_)) => value.into_expr(),
        _ => None,
    }
}

/// `2 + 3 = 5`
/// `6 / 3 = 2`
/// `"a" + "b" = "ab"`
///
/// Division and exponentiation are only folded when they produce an integer, so that `1/3` stays
/// exact.
pub fn fold_binary(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Binary(op, lhs, rhs) = expr else {
        return None;
    };
    let value = eval_binary(*op, literal_value(lhs)?, literal_value(rhs)?).ok()?;
    if matches!(op, BinOpKind::Div | BinOpKind::Exp) {
        if let Value::Number(n) = value {
            if n.fract() != 0.0 {
                return None;
            }
        }
    }

    let folded = into_literal(value)?;
    step_collector.push(Step::FoldConstants);
    Some(folded)
}

/// `-(3) = -3`
/// `!true = false`
/// `5! = 120`
pub fn fold_unary(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Unary(op, operand) = expr else {
        return None;
    };
    let folded = into_literal(eval_unary(*op, literal_value(operand)?).ok()?)?;
    step_collector.push(Step::FoldConstants);
    Some(folded)
}

/// `sqrt(16) = 4`
/// `gcd(12, 18) = 6`
///
/// Only calls producing an integer are folded. Trigonometric functions depend on the angle mode
/// of whoever evaluates the tree, and `rand` on nothing at all, so they are never folded.
pub fn fold_call(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Func(func, args) = expr else {
        return None;
    };
    if func.is_trigonometric() || func.is_inverse_trigonometric() || args.is_empty() {
        return None;
    }

    let args = args.iter()
        .map(|arg| arg.as_number().map(Value::Number))
        .collect::<Option<Vec<_>>>()?;
    let n = match funcs::call(*func, args, TrigMode::Radians).ok()? {
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => n,
        _ => return None,
    };

    step_collector.push(Step::FoldConstants);
    Some(Expr::Number(n + 0.0))
}

/// Applies all folding rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_binary(expr, step_collector)
        .or_else(|| fold_unary(expr, step_collector))
        .or_else(|| fold_call(expr, step_collector))
}
