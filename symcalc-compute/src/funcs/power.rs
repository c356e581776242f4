//! Exponential, logarithmic, and root functions.

use symcalc_parser::parser::ast::Func;
use crate::{error::{error, kind::InvalidArgument, Error}, value::Value};
use super::invalid_arguments;

/// Computes the `n`-th root of `x`. Odd roots of negative numbers are real.
pub fn root(x: f64, n: f64) -> Result<f64, Error> {
    if n == 0.0 {
        return Err(error(InvalidArgument {
            name: "root",
            reason: "the zeroth root is undefined".to_string(),
        }));
    }
    if x < 0.0 && n.fract() == 0.0 && n % 2.0 != 0.0 {
        Ok(-(-x).powf(n.recip()))
    } else {
        Ok(x.powf(n.recip()))
    }
}

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    Ok(match (func, args) {
        (Func::Exp, [Value::Number(x)]) => x.exp().into(),
        (Func::Exp, [Value::Complex(z)]) => z.exp().into(),
        (Func::Ln, [Value::Number(x)]) => x.ln().into(),
        (Func::Ln, [Value::Complex(z)]) => z.ln().into(),
        (Func::Log, [Value::Number(x)]) => x.log10().into(),
        (Func::Log, [Value::Number(x), Value::Number(base)]) => x.log(*base).into(),
        (Func::Sqrt, [Value::Number(x)]) => x.sqrt().into(),
        (Func::Sqrt, [Value::Complex(z)]) => z.sqrt().into(),
        (Func::Cbrt, [Value::Number(x)]) => x.cbrt().into(),
        (Func::Root, [Value::Number(x), Value::Number(n)]) => root(*x, *n)?.into(),
        _ => return Err(invalid_arguments(func, args)),
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use super::*;

    #[test]
    fn log_base_is_second() {
        let value = call(Func::Log, &[Value::Number(8.0), Value::Number(2.0)]).unwrap();
        assert_float_relative_eq!(value.as_number().unwrap(), 3.0);
    }

    #[test]
    fn odd_roots_of_negatives() {
        assert_float_relative_eq!(root(-27.0, 3.0).unwrap(), -3.0);
        assert!(root(-16.0, 4.0).unwrap().is_nan());
        assert!(root(2.0, 0.0).is_err());
    }
}
