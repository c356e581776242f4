pub mod fmt;
pub mod matrix;

pub use matrix::Matrix;

use num_complex::Complex64;
use symcalc_parser::parser::ast::Expr;
use symcalc_unit_convert::Measurement;
use crate::types::ResultType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user-defined function, stored in the symbol table like any other value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lambda {
    /// The names of the parameters, in order.
    pub params: Vec<String>,

    /// The body of the function.
    pub body: Expr,
}

/// The result of executing an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// A real number.
    Number(f64),

    /// A boolean value.
    Boolean(bool),

    /// A complex number.
    Complex(Complex64),

    /// A number with a unit attached.
    Quantity(Measurement),

    /// A vector of real numbers.
    Vector(Vec<f64>),

    /// A matrix of real numbers.
    Matrix(Matrix),

    /// A string.
    Str(String),

    /// A user-defined function.
    Lambda(Lambda),
}

impl Value {
    /// Returns the name of the type of the value, as shown in error messages.
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Complex(_) => "complex",
            Value::Quantity(_) => "quantity",
            Value::Vector(_) => "vector",
            Value::Matrix(_) => "matrix",
            Value::Str(_) => "string",
            Value::Lambda(_) => "function",
        }
    }

    /// Returns the type the value has in the operator tables. Functions have no such type, so they
    /// are [`ResultType::Undefined`].
    pub fn result_type(&self) -> ResultType {
        match self {
            Value::Number(_) => ResultType::Number,
            Value::Boolean(_) => ResultType::Boolean,
            Value::Complex(_) => ResultType::Complex,
            Value::Quantity(m) => ResultType::Quantity(m.dimension()),
            Value::Vector(_) => ResultType::Vector,
            Value::Matrix(_) => ResultType::Matrix,
            Value::Str(_) => ResultType::Str,
            Value::Lambda(_) => ResultType::Undefined,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a complex number, promoting real numbers.
    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Number(n) => Some(Complex64::new(*n, 0.0)),
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Converts the value back into a literal expression, if the tree can represent it.
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            Value::Number(n) => Some(Expr::Number(n)),
            Value::Boolean(b) => Some(Expr::Boolean(b)),
            Value::Str(s) => Some(Expr::Str(s)),
            Value::Quantity(m) => Some(Expr::Quantity(m.value, m.unit)),
            Value::Vector(v) => Some(Expr::Vector(v.into_iter().map(Expr::Number).collect())),
            Value::Matrix(m) => Some(Expr::Matrix(
                (0..m.rows())
                    .map(|i| m.row(i).iter().copied().map(Expr::Number).collect())
                    .collect(),
            )),
            Value::Complex(_) | Value::Lambda(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

impl From<Measurement> for Value {
    fn from(m: Measurement) -> Self {
        Value::Quantity(m)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}
