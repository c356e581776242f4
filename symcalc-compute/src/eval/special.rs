//! Unit conversion, summations, and products.

use symcalc_parser::parser::{ast::Expr, token::op::BinOpKind};
use symcalc_unit_convert::convert;
use tracing::trace;
use crate::{
    ctxt::{Bindings, ScopedTable},
    error::{error, kind::{ConversionFailed, InvalidArgument, InvalidConversion}, Error},
    funcs::to_integer,
    value::Value,
};
use super::{binary::eval_binary, Eval};

/// The most terms a single summation or product may evaluate.
pub const MAX_SERIES_TERMS: i64 = 1 << 24;

/// Converts a quantity into the unit with the given name.
pub fn eval_convert(value: Value, unit: &str) -> Result<Value, Error> {
    match value {
        Value::Quantity(m) => convert(m, unit)
            .map(Value::Quantity)
            .map_err(|err| error(ConversionFailed { reason: err.to_string() })),
        other => Err(error(InvalidConversion { found: other.typename() })),
    }
}

/// Whether a series adds or multiplies its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Summation,
    Product,
}

impl Series {
    fn name(self) -> &'static str {
        match self {
            Series::Summation => "summation",
            Series::Product => "product",
        }
    }

    fn op(self) -> BinOpKind {
        match self {
            Series::Summation => BinOpKind::Add,
            Series::Product => BinOpKind::Mul,
        }
    }

    /// The value of the series when it has no terms.
    fn identity(self) -> Value {
        match self {
            Series::Summation => Value::Number(0.0),
            Series::Product => Value::Number(1.0),
        }
    }
}

/// Evaluates a bound of a series, which must be an integer.
fn eval_bound(series: Series, bound: &Expr, bindings: &mut dyn Bindings) -> Result<i64, Error> {
    match bound.eval(bindings)? {
        Value::Number(n) => to_integer(series.name(), n),
        other => Err(error(InvalidArgument {
            name: series.name(),
            reason: format!("the bounds must be integers, found a `{}`", other.typename()),
        })),
    }
}

/// Evaluates the body once for each integer from `from` to `to` inclusive, with `var` bound to
/// that integer, and combines the results. An empty range produces the identity of the series.
pub fn eval_series(
    series: Series,
    var: &str,
    from: &Expr,
    to: &Expr,
    body: &Expr,
    bindings: &mut dyn Bindings,
) -> Result<Value, Error> {
    let from = eval_bound(series, from, bindings)?;
    let to = eval_bound(series, to, bindings)?;
    if to.saturating_sub(from) >= MAX_SERIES_TERMS {
        return Err(error(InvalidArgument {
            name: series.name(),
            reason: format!("at most {} terms can be evaluated", MAX_SERIES_TERMS),
        }));
    }
    trace!(series = series.name(), var, from, to, "evaluating series");

    let mut scope = ScopedTable::new(&*bindings);
    let mut result: Option<Value> = None;
    for k in from..=to {
        scope.define_local(var, Value::Number(k as f64));
        let term = body.eval(&mut scope)?;
        result = Some(match result {
            Some(acc) => eval_binary(series.op(), acc, term)?,
            None => term,
        });
    }
    Ok(result.unwrap_or_else(|| series.identity()))
}
