use symcalc_parser::parser::ast::Func;
use crate::{error::Error, value::Value};
use super::invalid_arguments;

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    if let (Func::Conj, [Value::Complex(z)]) = (func, args) {
        return Ok(z.conj().into());
    }
    let Some(z) = (match args {
        [arg] => arg.as_complex(),
        _ => None,
    }) else {
        return Err(invalid_arguments(func, args));
    };
    Ok(Value::Number(match func {
        Func::Re | Func::Conj => z.re,
        Func::Im => z.im,
        Func::Arg => z.arg(),
        _ => return Err(invalid_arguments(func, args)),
    }))
}
