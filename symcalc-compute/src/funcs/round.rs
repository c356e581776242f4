use symcalc_parser::parser::ast::Func;
use symcalc_unit_convert::Measurement;
use crate::{error::Error, value::Value};
use super::invalid_arguments;

/// Returns the sign of the number, or zero for zero.
pub fn sign(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    Ok(match (func, args) {
        (Func::Abs, [Value::Number(x)]) => x.abs().into(),
        (Func::Abs, [Value::Complex(z)]) => z.norm().into(),
        (Func::Abs, [Value::Quantity(m)]) => Measurement::new(m.value.abs(), m.unit).into(),
        (Func::Floor, [Value::Number(x)]) => x.floor().into(),
        (Func::Ceil, [Value::Number(x)]) => x.ceil().into(),
        (Func::Round, [Value::Number(x)]) => x.round().into(),
        (Func::Sign, [Value::Number(x)]) => sign(*x).into(),
        _ => return Err(invalid_arguments(func, args)),
    })
}
