//! Simplification rules for products and negations, including combining like factors.
//!
//! A product in canonical form is a numeric coefficient followed by the remaining factors, sorted
//! by their printed form, each distinct base appearing once:
//!
//! - `x * 3 * x` becomes `3 * x^2`
//! - `-(y * x)` stays a negation, but of `x * y`
//! - `x * 0` becomes `0`

use symcalc_parser::parser::{ast::Expr, token::op::{BinOpKind, UnaryOpKind}};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};
use super::is_non_scalar_literal;

/// Flattens nested products and negations, multiplying number literals into the coefficient.
fn collect_factors(expr: &Expr, coefficient: &mut f64, factors: &mut Vec<Expr>) {
    match expr {
        Expr::Binary(BinOpKind::Mul, lhs, rhs) => {
            collect_factors(lhs, coefficient, factors);
            collect_factors(rhs, coefficient, factors);
        },
        Expr::Unary(UnaryOpKind::Neg, operand) => {
            *coefficient = -*coefficient;
            collect_factors(operand, coefficient, factors);
        },
        Expr::Number(n) => *coefficient *= n,
        other => factors.push(other.clone()),
    }
}

/// Splits a factor into its base and numeric exponent.
fn split_power(factor: Expr) -> (Expr, f64) {
    match factor {
        Expr::Binary(BinOpKind::Exp, base, exponent) => match exponent.as_number() {
            Some(n) => (*base, n),
            None => (Expr::Binary(BinOpKind::Exp, base, exponent), 1.0),
        },
        other => (other, 1.0),
    }
}

/// Splits the expression into a numeric coefficient and its other factors, in canonical order.
/// Factors with the same base are merged by adding their exponents.
///
/// Returns [`None`] if a factor is a non-scalar literal, which must keep its position.
pub(crate) fn factorize(expr: &Expr) -> Option<(f64, Vec<Expr>)> {
    let mut coefficient = 1.0;
    let mut factors = Vec::new();
    collect_factors(expr, &mut coefficient, &mut factors);
    if factors.iter().any(is_non_scalar_literal) {
        return None;
    }

    let mut powers: Vec<(Expr, f64)> = Vec::with_capacity(factors.len());
    for factor in factors {
        let (base, exponent) = split_power(factor);
        let existing = powers.iter().position(|(other, _)| *other == base);
        match existing {
            Some(i) => powers[i].1 += exponent,
            None => powers.push((base, exponent)),
        }
    }

    let mut factors = powers.into_iter()
        .filter(|(_, exponent)| *exponent != 0.0)
        .map(|(base, exponent)| {
            if exponent == 1.0 {
                base
            } else {
                Expr::binary(BinOpKind::Exp, base, Expr::Number(exponent))
            }
        })
        .map(|factor| (factor.to_string(), factor))
        .collect::<Vec<_>>();
    factors.sort_by(|(a, _), (b, _)| a.cmp(b));
    Some((coefficient, factors.into_iter().map(|(_, factor)| factor).collect()))
}

/// Builds the canonical product of a coefficient and factors that are already in canonical order.
pub(crate) fn build_product(coefficient: f64, factors: Vec<Expr>) -> Expr {
    if coefficient == 0.0 {
        return Expr::Number(0.0);
    }

    let mut factors = factors.into_iter();
    let Some(first) = factors.next() else {
        return Expr::Number(coefficient);
    };
    let head = if coefficient.abs() == 1.0 {
        first
    } else {
        Expr::binary(BinOpKind::Mul, Expr::Number(coefficient), first)
    };
    let product = factors.fold(head, |product, factor| Expr::binary(BinOpKind::Mul, product, factor));
    if coefficient == -1.0 {
        Expr::unary(UnaryOpKind::Neg, product)
    } else {
        product
    }
}

/// Counts the leaves of a product, including number literals.
fn count_factors(expr: &Expr) -> usize {
    match expr {
        Expr::Binary(BinOpKind::Mul, lhs, rhs) => count_factors(lhs) + count_factors(rhs),
        Expr::Unary(UnaryOpKind::Neg, operand) => count_factors(operand),
        _ => 1,
    }
}

/// `--a = a`
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Unary(UnaryOpKind::Neg, operand) = expr else {
        return None;
    };
    let Expr::Unary(UnaryOpKind::Neg, inner) = &**operand else {
        return None;
    };
    if is_non_scalar_literal(inner) {
        return None;
    }

    step_collector.push(Step::DoubleNegation);
    Some((**inner).clone())
}

/// `0*a = 0`
/// `1*a = a`
/// `a*2*a = 2a^2`
/// `b*a = a*b`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !matches!(expr, Expr::Binary(BinOpKind::Mul, ..) | Expr::Unary(UnaryOpKind::Neg, _)) {
        return None;
    }

    let (coefficient, factors) = factorize(expr)?;
    let after = factors.len() + usize::from(coefficient.abs() != 1.0);
    let result = build_product(coefficient, factors);
    if result == *expr {
        return None;
    }

    if after < count_factors(expr) {
        step_collector.push(Step::CombineLikeFactors);
    } else {
        step_collector.push(Step::ReorderFactors);
    }
    Some(result)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_negation(expr, step_collector)
        .or_else(|| combine_like_factors(expr, step_collector))
}
