//! Simplification rules for sums and differences, including combining like terms.
//!
//! A sum in canonical form lists its terms by descending degree, then by their printed form, with
//! the constant term last. Terms with a negative coefficient are subtracted:
//!
//! - `1 + x^2 + 2x` becomes `x^2 + 2 * x + 1`
//! - `2x + 3x` becomes `5 * x`
//! - `x - x` becomes `0`

use symcalc_parser::parser::{ast::Expr, token::op::{BinOpKind, UnaryOpKind}};
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};
use super::{is_non_scalar_literal, multiply::{build_product, factorize}};

/// A term of a sum, a numeric coefficient multiplying the product of some factors.
#[derive(Debug)]
struct Term {
    coefficient: f64,
    factors: Vec<Expr>,
}

impl Term {
    /// The sum of the numeric exponents of the factors. Factors without one count as `1`.
    fn degree(&self) -> f64 {
        self.factors
            .iter()
            .map(|factor| match factor {
                Expr::Binary(BinOpKind::Exp, _, exponent) => exponent.as_number().unwrap_or(1.0),
                _ => 1.0,
            })
            .sum()
    }
}

/// Flattens nested sums, differences, and negations into a list of signed terms.
fn collect_terms(expr: &Expr, sign: f64, terms: &mut Vec<(f64, Expr)>) {
    match expr {
        Expr::Binary(BinOpKind::Add, lhs, rhs) => {
            collect_terms(lhs, sign, terms);
            collect_terms(rhs, sign, terms);
        },
        Expr::Binary(BinOpKind::Sub, lhs, rhs) => {
            collect_terms(lhs, sign, terms);
            collect_terms(rhs, -sign, terms);
        },
        Expr::Unary(UnaryOpKind::Neg, operand) => collect_terms(operand, -sign, terms),
        other => terms.push((sign, other.clone())),
    }
}

/// Builds the canonical sum of the given terms, which must already be sorted, and a constant.
fn build_sum(terms: Vec<Term>, constant: f64) -> Expr {
    let constant = (constant != 0.0).then(|| (constant, Vec::new()));
    let mut sum: Option<Expr> = None;
    for (coefficient, factors) in terms.into_iter().map(|t| (t.coefficient, t.factors)).chain(constant) {
        sum = Some(match sum {
            None => build_product(coefficient, factors),
            Some(sum) if coefficient < 0.0 => {
                Expr::binary(BinOpKind::Sub, sum, build_product(-coefficient, factors))
            },
            Some(sum) => Expr::binary(BinOpKind::Add, sum, build_product(coefficient, factors)),
        });
    }
    sum.unwrap_or(Expr::Number(0.0))
}

/// `a+0 = a`
/// `a+a = 2a`
/// `2a-3a = -a`
/// `1+a = a+1`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if !matches!(expr, Expr::Binary(BinOpKind::Add | BinOpKind::Sub, ..)) {
        return None;
    }

    let mut signed = Vec::new();
    collect_terms(expr, 1.0, &mut signed);
    if signed.iter().any(|(_, term)| is_non_scalar_literal(term)) {
        return None;
    }

    let mut constant = 0.0;
    let mut terms: Vec<Term> = Vec::with_capacity(signed.len());
    for (sign, term) in &signed {
        let (coefficient, factors) = factorize(term)?;
        let coefficient = sign * coefficient;
        if factors.is_empty() {
            constant += coefficient;
            continue;
        }
        let existing = terms.iter().position(|term| term.factors == factors);
        match existing {
            Some(i) => terms[i].coefficient += coefficient,
            None => terms.push(Term { coefficient, factors }),
        }
    }
    terms.retain(|term| term.coefficient != 0.0);

    let mut keyed = terms.into_iter()
        .map(|term| {
            let key = build_product(1.0, term.factors.clone()).to_string();
            (term.degree(), key, term)
        })
        .collect::<Vec<_>>();
    keyed.sort_by(|(deg_a, key_a, _), (deg_b, key_b, _)| {
        deg_b.total_cmp(deg_a).then_with(|| key_a.cmp(key_b))
    });

    let count = keyed.len() + usize::from(constant != 0.0);
    let result = build_sum(keyed.into_iter().map(|(_, _, term)| term).collect(), constant);
    if result == *expr {
        return None;
    }

    if count < signed.len() {
        step_collector.push(Step::CombineLikeTerms);
    } else {
        step_collector.push(Step::ReorderTerms);
    }
    Some(result)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    combine_like_terms(expr, step_collector)
}
