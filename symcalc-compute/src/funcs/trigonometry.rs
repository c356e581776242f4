//! Trigonometric and hyperbolic functions.

use num_complex::Complex64;
use symcalc_parser::parser::ast::Func;
use crate::{error::Error, trig_mode::TrigMode, value::Value};
use super::invalid_arguments;

/// Results smaller than this, for an input that is not itself tiny, are rounding noise from
/// evaluating at a multiple of pi, such as `cos(pi / 2)`.
const NOISE: f64 = 1e-15;

fn real(func: Func) -> Option<fn(f64) -> f64> {
    let f: fn(f64) -> f64 = match func {
        Func::Sin => f64::sin,
        Func::Cos => f64::cos,
        Func::Tan => f64::tan,
        Func::Csc => |x| 1.0 / x.sin(),
        Func::Sec => |x| 1.0 / x.cos(),
        Func::Cot => |x| 1.0 / x.tan(),
        Func::Asin => f64::asin,
        Func::Acos => f64::acos,
        Func::Atan => f64::atan,
        Func::Acsc => |x| (1.0 / x).asin(),
        Func::Asec => |x| (1.0 / x).acos(),
        Func::Acot => |x| (1.0 / x).atan(),
        Func::Sinh => f64::sinh,
        Func::Cosh => f64::cosh,
        Func::Tanh => f64::tanh,
        Func::Csch => |x| 1.0 / x.sinh(),
        Func::Sech => |x| 1.0 / x.cosh(),
        Func::Coth => |x| 1.0 / x.tanh(),
        Func::Asinh => f64::asinh,
        Func::Acosh => f64::acosh,
        Func::Atanh => f64::atanh,
        Func::Acsch => |x| (1.0 / x).asinh(),
        Func::Asech => |x| (1.0 / x).acosh(),
        Func::Acoth => |x| (1.0 / x).atanh(),
        _ => return None,
    };
    Some(f)
}

fn complex(func: Func) -> Option<fn(Complex64) -> Complex64> {
    let f: fn(Complex64) -> Complex64 = match func {
        Func::Sin => |z| z.sin(),
        Func::Cos => |z| z.cos(),
        Func::Tan => |z| z.tan(),
        Func::Csc => |z| z.sin().inv(),
        Func::Sec => |z| z.cos().inv(),
        Func::Cot => |z| z.tan().inv(),
        Func::Asin => |z| z.asin(),
        Func::Acos => |z| z.acos(),
        Func::Atan => |z| z.atan(),
        Func::Acsc => |z| z.inv().asin(),
        Func::Asec => |z| z.inv().acos(),
        Func::Acot => |z| z.inv().atan(),
        Func::Sinh => |z| z.sinh(),
        Func::Cosh => |z| z.cosh(),
        Func::Tanh => |z| z.tanh(),
        Func::Csch => |z| z.sinh().inv(),
        Func::Sech => |z| z.cosh().inv(),
        Func::Coth => |z| z.tanh().inv(),
        Func::Asinh => |z| z.asinh(),
        Func::Acosh => |z| z.acosh(),
        Func::Atanh => |z| z.atanh(),
        Func::Acsch => |z| z.inv().asinh(),
        Func::Asech => |z| z.inv().acosh(),
        Func::Acoth => |z| z.inv().atanh(),
        _ => return None,
    };
    Some(f)
}

/// Evaluates a trigonometric function. Plain numbers are interpreted in the given mode, while
/// angle quantities are converted to radians through their unit.
pub fn trig(func: Func, args: &[Value], mode: TrigMode) -> Result<Value, Error> {
    let (Some(f), Some(g)) = (real(func), complex(func)) else {
        return Err(invalid_arguments(func, args));
    };
    let radians = match args {
        [Value::Number(n)] => mode.to_radians(*n),
        [Value::Quantity(angle)] => angle.base_value(),
        [Value::Complex(z)] => return Ok(g(*z).into()),
        _ => return Err(invalid_arguments(func, args)),
    };
    let result = f(radians);
    if result.abs() < NOISE && radians.abs() > NOISE {
        Ok(Value::Number(0.0))
    } else {
        Ok(Value::Number(result))
    }
}

/// Evaluates an inverse trigonometric function, returning a real angle in the given mode.
pub fn inverse_trig(func: Func, args: &[Value], mode: TrigMode) -> Result<Value, Error> {
    let (Some(f), Some(g)) = (real(func), complex(func)) else {
        return Err(invalid_arguments(func, args));
    };
    match args {
        [Value::Number(n)] => Ok(Value::Number(mode.from_radians(f(*n)))),
        [Value::Complex(z)] => Ok(g(*z).into()),
        _ => Err(invalid_arguments(func, args)),
    }
}

/// Evaluates a hyperbolic function or its inverse. These never depend on the trigonometric mode.
pub fn hyperbolic(func: Func, args: &[Value]) -> Result<Value, Error> {
    let (Some(f), Some(g)) = (real(func), complex(func)) else {
        return Err(invalid_arguments(func, args));
    };
    match args {
        [Value::Number(n)] => Ok(Value::Number(f(*n))),
        [Value::Complex(z)] => Ok(g(*z).into()),
        _ => Err(invalid_arguments(func, args)),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use std::f64::consts::PI;
    use symcalc_unit_convert::{Angle, Measurement};
    use super::*;

    fn number(value: Value) -> f64 {
        value.as_number().unwrap()
    }

    #[test]
    fn degree_mode() {
        let sin = trig(Func::Sin, &[Value::Number(90.0)], TrigMode::Degrees).unwrap();
        assert_float_relative_eq!(number(sin), 1.0);
        let cos = trig(Func::Cos, &[Value::Number(90.0)], TrigMode::Degrees).unwrap();
        assert_eq!(number(cos), 0.0);
    }

    #[test]
    fn angle_quantities_ignore_mode() {
        let angle = Value::Quantity(Measurement::new(90.0, Angle::Degree));
        let sin = trig(Func::Sin, &[angle], TrigMode::Radians).unwrap();
        assert_float_relative_eq!(number(sin), 1.0);
    }

    #[test]
    fn inverse_in_mode() {
        let asin = inverse_trig(Func::Asin, &[Value::Number(1.0)], TrigMode::Degrees).unwrap();
        assert_float_relative_eq!(number(asin), 90.0);
        let acot = inverse_trig(Func::Acot, &[Value::Number(1.0)], TrigMode::Radians).unwrap();
        assert_float_relative_eq!(number(acot), PI / 4.0);
    }

    #[test]
    fn complex_sine() {
        let z = Complex64::new(0.0, 1.0);
        let Value::Complex(result) = trig(Func::Sin, &[Value::Complex(z)], TrigMode::Degrees).unwrap() else {
            panic!("expected a complex result");
        };
        assert_float_relative_eq!(result.im, 1f64.sinh());
    }
}
