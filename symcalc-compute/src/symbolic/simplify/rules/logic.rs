//! Simplification rules for logic, conditionals, and the ordering of commutative operators other
//! than `+` and `*`.

use symcalc_parser::parser::{ast::Expr, token::op::{BinOpKind, UnaryOpKind}};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};

/// `true & p = p`
/// `false & p = false`
/// `true | p = true`
/// `false | p = p`
///
/// Both sides are always evaluated, so these hold for any boolean `p`.
pub fn logic_identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = match expr {
        Expr::Binary(op @ (BinOpKind::And | BinOpKind::Or), lhs, rhs) => {
            let (constant, other) = match (&**lhs, &**rhs) {
                (Expr::Boolean(b), other) | (other, Expr::Boolean(b)) => (*b, other),
                _ => return None,
            };
            // `true` is the identity of `&`, and `false` of `|`
            if constant == (*op == BinOpKind::And) {
                other.clone()
            } else {
                Expr::Boolean(constant)
            }
        },
        Expr::Unary(UnaryOpKind::Not, operand) => match &**operand {
            Expr::Unary(UnaryOpKind::Not, inner) => (**inner).clone(),
            _ => return None,
        },
        _ => return None,
    };

    step_collector.push(Step::LogicIdentity);
    Some(opt)
}

/// `if(true, a, b) = a`
/// `if(false, a, b) = b`
pub fn constant_condition(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::If(condition, then, otherwise) = expr else {
        return None;
    };
    let Expr::Boolean(condition) = **condition else {
        return None;
    };

    step_collector.push(Step::ConstantCondition);
    Some(if condition { (**then).clone() } else { (**otherwise).clone() })
}

/// `if(c, a, a) = a`
pub fn same_branches(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr {
        Expr::If(_, then, otherwise) if then == otherwise => {
            step_collector.push(Step::SameBranches);
            Some((**then).clone())
        },
        _ => None,
    }
}

/// `b == a = a == b`
///
/// `+` and `*` are ordered by the addition and multiplication rules.
pub fn reorder_operands(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr {
        Expr::Binary(op, lhs, rhs)
            if op.is_commutative()
                && !matches!(op, BinOpKind::Add | BinOpKind::Mul)
                && lhs.to_string() > rhs.to_string() =>
        {
            step_collector.push(Step::ReorderOperands);
            Some(Expr::Binary(*op, rhs.clone(), lhs.clone()))
        },
        _ => None,
    }
}

/// Applies all logic rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    logic_identity(expr, step_collector)
        .or_else(|| constant_condition(expr, step_collector))
        .or_else(|| same_branches(expr, step_collector))
        .or_else(|| reorder_operands(expr, step_collector))
}
