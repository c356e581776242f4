//! Implementations of the builtin functions.
//!
//! [`call`] checks the argument types against the function table in [`crate::types`] before
//! dispatching, so the implementations only destructure arguments of the types they accept.

pub mod combinatoric;
pub mod complex;
pub mod linalg;
pub mod power;
pub mod round;
pub mod statistics;
pub mod trigonometry;

use symcalc_parser::parser::ast::Func;
use crate::{
    error::{error, kind::{InvalidArgument, InvalidArguments}, Error},
    trig_mode::TrigMode,
    types::{func_type, ResultType},
    value::Value,
};

/// Integers beyond this magnitude cannot be represented exactly by an `f64`.
pub(crate) const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Builds the error for a function called with arguments of the wrong types.
pub(crate) fn invalid_arguments(func: Func, args: &[Value]) -> Error {
    error(InvalidArguments {
        name: func.name(),
        given: args.iter().map(Value::typename).collect(),
    })
}

/// Converts a number to an integer, failing if it has a fractional part.
pub(crate) fn to_integer(name: &'static str, n: f64) -> Result<i64, Error> {
    if n.fract() != 0.0 || !n.is_finite() || n.abs() > MAX_EXACT_INTEGER {
        return Err(error(InvalidArgument {
            name,
            reason: format!("expected an integer, found `{}`", n),
        }));
    }
    Ok(n as i64)
}

/// Converts a number to a non-negative integer.
pub(crate) fn to_natural(name: &'static str, n: f64) -> Result<u64, Error> {
    let integer = to_integer(name, n)?;
    u64::try_from(integer).map_err(|_| error(InvalidArgument {
        name,
        reason: format!("expected a non-negative integer, found `{}`", integer),
    }))
}

/// Calls the builtin function with the given arguments.
pub fn call(func: Func, args: Vec<Value>, trig_mode: TrigMode) -> Result<Value, Error> {
    let types = args.iter().map(Value::result_type).collect::<Vec<ResultType>>();
    if func_type(func, &types).is_none() {
        return Err(invalid_arguments(func, &args));
    }

    match func {
        func if func.is_trigonometric() => trigonometry::trig(func, &args, trig_mode),
        func if func.is_inverse_trigonometric() => trigonometry::inverse_trig(func, &args, trig_mode),
        func if func.is_hyperbolic() => trigonometry::hyperbolic(func, &args),
        Func::Exp | Func::Ln | Func::Log | Func::Sqrt | Func::Cbrt | Func::Root => {
            power::call(func, &args)
        },
        Func::Abs | Func::Floor | Func::Ceil | Func::Round | Func::Sign => round::call(func, &args),
        Func::Gcd | Func::Lcm | Func::Factorial | Func::Ncr | Func::Npr => {
            combinatoric::call(func, &args)
        },
        func if func.is_aggregate() => statistics::call(func, &args),
        Func::Re | Func::Im | Func::Arg | Func::Conj => complex::call(func, &args),
        Func::Det | Func::Inverse | Func::Transpose | Func::Dot | Func::Cross | Func::Norm => {
            linalg::call(func, &args)
        },
        Func::Rand => Ok(Value::Number(rand::random::<f64>())),
        _ => Err(invalid_arguments(func, &args)),
    }
}
