//! Whole-tree passes over expressions.
//!
//! Every pass here walks an [`Expr`] without evaluating it, and each is implemented as one
//! recursive function over the closed set of node kinds:
//!
//! - [`Differentiator`] builds the symbolic derivative of an expression with respect to a
//!   variable, then simplifies it.
//! - [`Simplifier`] rewrites an expression into a smaller, semantically equal one. Sums and
//!   products are put into a canonical order, so that trees which only differ in the order of
//!   their operands simplify to the same tree.
//! - [`TypeAnalyzer`] infers the [`ResultType`](crate::types::ResultType) an expression would
//!   evaluate to, and rejects expressions that can never evaluate successfully.
//!
//! All three implement [`Analyzer`], so a front end can run any of them through [`analyze`].
//!
//! ```
//! use symcalc_compute::symbolic::{analyze, Simplifier};
//! use symcalc_parser::parse;
//!
//! let expr = parse("2*x + 3*x").unwrap();
//! let simplified = analyze(&expr, &mut Simplifier::default()).unwrap();
//! assert_eq!(simplified.to_string(), "5 * x");
//! ```

pub mod derivative;
pub mod simplify;
pub mod step_collector;
pub mod typeck;

pub use derivative::{differentiate, differentiate_n, Differentiator};
pub use simplify::{simplify, simplify_with_steps, Simplifier};
pub use step_collector::StepCollector;
pub use typeck::{infer, TypeAnalyzer};

use symcalc_parser::parser::ast::Expr;
use crate::error::Error;

/// A pass that walks an expression tree and produces a result from it.
pub trait Analyzer {
    /// What the pass produces.
    type Output;

    /// Runs the pass on the given expression.
    fn analyze(&mut self, expr: &Expr) -> Result<Self::Output, Error>;
}

/// Runs the given pass on the expression.
pub fn analyze<A: Analyzer + ?Sized>(expr: &Expr, analyzer: &mut A) -> Result<A::Output, Error> {
    analyzer.analyze(expr)
}
