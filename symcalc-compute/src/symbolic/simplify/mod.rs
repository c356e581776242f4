//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce the complexity of an
//! expression. Children are simplified before their parent. Then the rules in [`rules`] are
//! applied to the parent until none of them applies, simplifying the children of each rewritten
//! node again, since a rewrite can expose new opportunities below it.
//!
//! Each rewrite of a node only happens when it changes the node, and the canonical forms of sums
//! and products are stable under the rules, so the output of [`simplify`] is a fixed point:
//! simplifying it again returns it unchanged. Whether the rule set is confluent for every input
//! has not been proven, so the number of rewrites applied to a single node is capped by
//! [`Simplifier::with_rewrite_limit`].
//!
//! The simplifier assumes that variables hold scalars. Operands of `+` and `*` are reordered and
//! combined freely, except for literals that are not scalars (strings, vectors, matrices, and
//! quantities), which keep their position.

pub mod rules;
pub mod step;

use symcalc_parser::parser::ast::Expr;
use tracing::{debug, trace};
use crate::error::Error;
use super::{step_collector::StepCollector, Analyzer};
use step::Step;

/// The maximum number of rewrites applied to a single node, unless configured otherwise.
pub const DEFAULT_REWRITE_LIMIT: usize = 64;

/// Simplifies expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simplifier {
    /// The maximum number of rewrites applied to a single node.
    rewrite_limit: usize,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self { rewrite_limit: DEFAULT_REWRITE_LIMIT }
    }
}

impl Simplifier {
    /// Creates a simplifier with the default rewrite limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rewrites applied to a single node.
    pub fn with_rewrite_limit(mut self, rewrite_limit: usize) -> Self {
        self.rewrite_limit = rewrite_limit;
        self
    }

    /// Simplifies the given expression.
    pub fn simplify(&self, expr: &Expr) -> Expr {
        let simplified = self.simplify_node(expr, &mut ());
        debug!(%expr, %simplified, "simplified");
        simplified
    }

    /// Simplifies the given expression. The steps taken by the simplifier are also collected and
    /// returned, in the order they were applied.
    pub fn simplify_with_steps(&self, expr: &Expr) -> (Expr, Vec<Step>) {
        let mut steps = Vec::new();
        let simplified = self.simplify_node(expr, &mut steps);
        debug!(%expr, %simplified, steps = steps.len(), "simplified");
        (simplified, steps)
    }

    /// Base implementation of the simplification algorithm.
    fn simplify_node(&self, expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
        let mut expr = expr.map_children(|child| self.simplify_node(child, step_collector));

        for _ in 0..self.rewrite_limit {
            match rules::all(&expr, step_collector) {
                Some(rewritten) => {
                    expr = rewritten.map_children(|child| self.simplify_node(child, step_collector));
                },
                None => return expr,
            }
        }

        trace!(%expr, limit = self.rewrite_limit, "rewrite limit reached");
        expr
    }
}

impl Analyzer for Simplifier {
    type Output = Expr;

    fn analyze(&mut self, expr: &Expr) -> Result<Expr, Error> {
        Ok(self.simplify(expr))
    }
}

/// Simplifies the given expression with the default [`Simplifier`].
pub fn simplify(expr: &Expr) -> Expr {
    Simplifier::default().simplify(expr)
}

/// Simplifies the given expression with the default [`Simplifier`], also returning the steps
/// taken. This is useful for debugging, and also for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    Simplifier::default().simplify_with_steps(expr)
}
