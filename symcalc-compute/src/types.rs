//! The operator and function tables.
//!
//! These tables list every combination of operand types each operator and builtin function is
//! defined for. The executor checks them before computing anything, and the
//! [`TypeAnalyzer`](crate::symbolic::typeck::TypeAnalyzer) infers types from them without
//! evaluating anything, so both always agree about which programs are well-typed.

use std::fmt::{Display, Formatter, Result};
use symcalc_parser::parser::{
    ast::Func,
    token::op::{BinOpKind, UnaryOpKind},
};
use symcalc_unit_convert::Dimension;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The static type of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResultType {
    /// The type is not known statically, for example because the expression reads a variable
    /// that is not bound yet.
    Undefined,
    Number,
    Boolean,
    Complex,
    Quantity(Dimension),
    Vector,
    Matrix,
    Str,
}

impl ResultType {
    /// Every concrete type, in the order they are tried when a type must be guessed.
    pub const CONCRETE: &'static [ResultType] = &[
        ResultType::Number,
        ResultType::Complex,
        ResultType::Boolean,
        ResultType::Vector,
        ResultType::Matrix,
        ResultType::Str,
        ResultType::Quantity(Dimension::Angle),
        ResultType::Quantity(Dimension::Length),
        ResultType::Quantity(Dimension::Area),
        ResultType::Quantity(Dimension::Volume),
        ResultType::Quantity(Dimension::Mass),
        ResultType::Quantity(Dimension::Time),
        ResultType::Quantity(Dimension::Temperature),
        ResultType::Quantity(Dimension::Power),
    ];

    /// Returns true if the type is known.
    pub fn is_concrete(&self) -> bool {
        *self != ResultType::Undefined
    }
}

impl Display for ResultType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ResultType::Undefined => write!(f, "undefined"),
            ResultType::Number => write!(f, "number"),
            ResultType::Boolean => write!(f, "boolean"),
            ResultType::Complex => write!(f, "complex"),
            ResultType::Quantity(dimension) => write!(f, "quantity ({})", dimension),
            ResultType::Vector => write!(f, "vector"),
            ResultType::Matrix => write!(f, "matrix"),
            ResultType::Str => write!(f, "string"),
        }
    }
}

/// The dimension of the product of two quantities, if the catalog has one.
pub fn dimension_product(left: Dimension, right: Dimension) -> Option<Dimension> {
    match (left, right) {
        (Dimension::Length, Dimension::Length) => Some(Dimension::Area),
        (Dimension::Length, Dimension::Area) | (Dimension::Area, Dimension::Length) => {
            Some(Dimension::Volume)
        },
        _ => None,
    }
}

/// The type of the quotient of two quantities. Quantities of the same dimension divide into a
/// plain number.
pub fn dimension_quotient(left: Dimension, right: Dimension) -> Option<ResultType> {
    match (left, right) {
        (left, right) if left == right => Some(ResultType::Number),
        (Dimension::Area, Dimension::Length) | (Dimension::Volume, Dimension::Area) => {
            Some(ResultType::Quantity(Dimension::Length))
        },
        (Dimension::Volume, Dimension::Length) => Some(ResultType::Quantity(Dimension::Area)),
        _ => None,
    }
}

/// Returns the type of applying the binary operator to operands of the given types, or [`None`]
/// if the operator is not defined for them.
///
/// Both types must be concrete; [`ResultType::Undefined`] is never accepted.
pub fn binary_type(op: BinOpKind, left: ResultType, right: ResultType) -> Option<ResultType> {
    use ResultType as T;
    match op {
        BinOpKind::Add | BinOpKind::Sub => match (left, right) {
            (T::Number, T::Number) => Some(T::Number),
            (T::Number | T::Complex, T::Number | T::Complex) => Some(T::Complex),
            (T::Quantity(a), T::Quantity(b)) if a == b => Some(T::Quantity(a)),
            (T::Vector, T::Vector) => Some(T::Vector),
            (T::Matrix, T::Matrix) => Some(T::Matrix),
            (T::Str, T::Str) if op == BinOpKind::Add => Some(T::Str),
            _ => None,
        },
        BinOpKind::Mul => match (left, right) {
            (T::Number, T::Number) => Some(T::Number),
            (T::Number | T::Complex, T::Number | T::Complex) => Some(T::Complex),
            (T::Number, T::Quantity(d)) | (T::Quantity(d), T::Number) => Some(T::Quantity(d)),
            (T::Quantity(a), T::Quantity(b)) => dimension_product(a, b).map(T::Quantity),
            (T::Number, T::Vector) | (T::Vector, T::Number) => Some(T::Vector),
            (T::Number, T::Matrix) | (T::Matrix, T::Number) => Some(T::Matrix),
            (T::Matrix, T::Matrix) => Some(T::Matrix),
            (T::Matrix, T::Vector) => Some(T::Vector),
            _ => None,
        },
        BinOpKind::Div => match (left, right) {
            (T::Number, T::Number) => Some(T::Number),
            (T::Number | T::Complex, T::Number | T::Complex) => Some(T::Complex),
            (T::Quantity(d), T::Number) => Some(T::Quantity(d)),
            (T::Quantity(a), T::Quantity(b)) => dimension_quotient(a, b),
            (T::Vector, T::Number) => Some(T::Vector),
            (T::Matrix, T::Number) => Some(T::Matrix),
            _ => None,
        },
        BinOpKind::Mod | BinOpKind::BitLeft | BinOpKind::BitRight => match (left, right) {
            (T::Number, T::Number) => Some(T::Number),
            _ => None,
        },
        BinOpKind::Exp => match (left, right) {
            (T::Number, T::Number) => Some(T::Number),
            (T::Number | T::Complex, T::Number | T::Complex) => Some(T::Complex),
            (T::Matrix, T::Number) => Some(T::Matrix),
            _ => None,
        },
        BinOpKind::Greater | BinOpKind::GreaterEq | BinOpKind::Less | BinOpKind::LessEq => {
            match (left, right) {
                (T::Number, T::Number) | (T::Str, T::Str) => Some(T::Boolean),
                (T::Quantity(a), T::Quantity(b)) if a == b => Some(T::Boolean),
                _ => None,
            }
        },
        BinOpKind::Eq | BinOpKind::NotEq => match (left, right) {
            (T::Number | T::Complex, T::Number | T::Complex) => Some(T::Boolean),
            (T::Undefined, _) | (_, T::Undefined) => None,
            (left, right) if left == right => Some(T::Boolean),
            _ => None,
        },
        BinOpKind::And | BinOpKind::Or | BinOpKind::Implies | BinOpKind::Biconditional => {
            match (left, right) {
                (T::Boolean, T::Boolean) => Some(T::Boolean),
                _ => None,
            }
        },
    }
}

/// Returns the type of applying the unary operator to an operand of the given type, or [`None`]
/// if the operator is not defined for it.
pub fn unary_type(op: UnaryOpKind, operand: ResultType) -> Option<ResultType> {
    use ResultType as T;
    match (op, operand) {
        (
            UnaryOpKind::Neg,
            T::Number | T::Complex | T::Quantity(_) | T::Vector | T::Matrix,
        ) => Some(operand),
        (UnaryOpKind::Not, T::Boolean) => Some(T::Boolean),
        (UnaryOpKind::Factorial, T::Number) => Some(T::Number),
        _ => None,
    }
}

/// Returns the type of calling the builtin function with arguments of the given types, or
/// [`None`] if the function is not defined for them.
pub fn func_type(func: Func, args: &[ResultType]) -> Option<ResultType> {
    use ResultType as T;
    let all_numbers = !args.is_empty() && args.iter().all(|arg| *arg == T::Number);
    match func {
        func if func.is_trigonometric() => match args {
            [T::Number | T::Quantity(Dimension::Angle)] => Some(T::Number),
            [T::Complex] => Some(T::Complex),
            _ => None,
        },
        func if func.is_inverse_trigonometric() || func.is_hyperbolic() => match args {
            [T::Number] => Some(T::Number),
            [T::Complex] => Some(T::Complex),
            _ => None,
        },
        Func::Exp | Func::Ln | Func::Sqrt => match args {
            [T::Number] => Some(T::Number),
            [T::Complex] => Some(T::Complex),
            _ => None,
        },
        Func::Cbrt | Func::Floor | Func::Ceil | Func::Round | Func::Sign | Func::Factorial => {
            match args {
                [T::Number] => Some(T::Number),
                _ => None,
            }
        },
        Func::Log => match args {
            [T::Number] | [T::Number, T::Number] => Some(T::Number),
            _ => None,
        },
        Func::Root | Func::Ncr | Func::Npr => match args {
            [T::Number, T::Number] => Some(T::Number),
            _ => None,
        },
        Func::Abs => match args {
            [T::Number | T::Complex] => Some(T::Number),
            [T::Quantity(d)] => Some(T::Quantity(*d)),
            _ => None,
        },
        Func::Norm => match args {
            [T::Number | T::Complex | T::Vector] => Some(T::Number),
            _ => None,
        },
        Func::Gcd | Func::Lcm => all_numbers.then_some(T::Number),
        func if func.is_aggregate() => match args {
            [T::Vector] => Some(T::Number),
            _ => all_numbers.then_some(T::Number),
        },
        Func::Re | Func::Im | Func::Arg => match args {
            [T::Number | T::Complex] => Some(T::Number),
            _ => None,
        },
        Func::Conj => match args {
            [T::Number] => Some(T::Number),
            [T::Complex] => Some(T::Complex),
            _ => None,
        },
        Func::Det => match args {
            [T::Matrix] => Some(T::Number),
            _ => None,
        },
        Func::Inverse | Func::Transpose => match args {
            [T::Matrix] => Some(T::Matrix),
            _ => None,
        },
        Func::Dot => match args {
            [T::Vector, T::Vector] => Some(T::Number),
            _ => None,
        },
        Func::Cross => match args {
            [T::Vector, T::Vector] => Some(T::Vector),
            _ => None,
        },
        Func::Rand => args.is_empty().then_some(T::Number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_products() {
        assert_eq!(
            binary_type(
                BinOpKind::Mul,
                ResultType::Quantity(Dimension::Length),
                ResultType::Quantity(Dimension::Length),
            ),
            Some(ResultType::Quantity(Dimension::Area)),
        );
        assert_eq!(
            binary_type(
                BinOpKind::Mul,
                ResultType::Quantity(Dimension::Area),
                ResultType::Quantity(Dimension::Length),
            ),
            Some(ResultType::Quantity(Dimension::Volume)),
        );
        assert_eq!(
            binary_type(
                BinOpKind::Mul,
                ResultType::Quantity(Dimension::Mass),
                ResultType::Quantity(Dimension::Mass),
            ),
            None,
        );
    }

    #[test]
    fn complex_against_angle() {
        assert_eq!(
            binary_type(
                BinOpKind::Add,
                ResultType::Complex,
                ResultType::Quantity(Dimension::Angle),
            ),
            None,
        );
        assert_eq!(
            binary_type(BinOpKind::Eq, ResultType::Complex, ResultType::Quantity(Dimension::Angle)),
            None,
        );
    }

    #[test]
    fn trig_accepts_angles() {
        assert_eq!(
            func_type(Func::Sin, &[ResultType::Quantity(Dimension::Angle)]),
            Some(ResultType::Number),
        );
        assert_eq!(func_type(Func::Sin, &[ResultType::Quantity(Dimension::Length)]), None);
        assert_eq!(func_type(Func::Asin, &[ResultType::Quantity(Dimension::Angle)]), None);
    }

    #[test]
    fn aggregates() {
        assert_eq!(func_type(Func::Max, &[ResultType::Vector]), Some(ResultType::Number));
        assert_eq!(
            func_type(Func::Max, &[ResultType::Number, ResultType::Number, ResultType::Number]),
            Some(ResultType::Number),
        );
        assert_eq!(func_type(Func::Gcd, &[ResultType::Vector]), None);
        assert_eq!(func_type(Func::Max, &[ResultType::Number, ResultType::Boolean]), None);
    }
}
