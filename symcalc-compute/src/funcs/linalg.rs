//! Vector and matrix functions.

use symcalc_parser::parser::ast::Func;
use crate::{
    error::{error, kind::DimensionMismatch, Error},
    value::Value,
};
use super::invalid_arguments;

/// Describes the shape of a vector for error messages.
pub(crate) fn vector_shape(v: &[f64]) -> String {
    format!("vector of length {}", v.len())
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, Error> {
    if a.len() != b.len() {
        return Err(error(DimensionMismatch {
            op: "take the dot product of",
            left: vector_shape(a),
            right: vector_shape(b),
        }));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

pub fn cross(a: &[f64], b: &[f64]) -> Result<Vec<f64>, Error> {
    let ([a1, a2, a3], [b1, b2, b3]) = (a, b) else {
        return Err(error(DimensionMismatch {
            op: "take the cross product of",
            left: vector_shape(a),
            right: vector_shape(b),
        }));
    };
    Ok(vec![a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1])
}

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    Ok(match (func, args) {
        (Func::Det, [Value::Matrix(m)]) => m.determinant()?.into(),
        (Func::Inverse, [Value::Matrix(m)]) => m.inverse()?.into(),
        (Func::Transpose, [Value::Matrix(m)]) => m.transpose().into(),
        (Func::Dot, [Value::Vector(a), Value::Vector(b)]) => dot(a, b)?.into(),
        (Func::Cross, [Value::Vector(a), Value::Vector(b)]) => cross(a, b)?.into(),
        (Func::Norm, [Value::Vector(v)]) => v.iter().map(|x| x * x).sum::<f64>().sqrt().into(),
        (Func::Norm, [Value::Number(x)]) => x.abs().into(),
        (Func::Norm, [Value::Complex(z)]) => z.norm().into(),
        _ => return Err(invalid_arguments(func, args)),
    })
}
