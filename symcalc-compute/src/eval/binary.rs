//! Evaluation of binary operators.
//!
//! Every operator application is first checked against [`binary_type`], then dispatched to a
//! function specialized for the pair of operand types.

use num_complex::Complex64;
use symcalc_parser::parser::token::op::BinOpKind;
use symcalc_unit_convert::{Measurement, Unit};
use crate::{
    error::{
        error,
        kind::{ConversionFailed, DimensionMismatch, DivideByZero, InvalidArgument, InvalidBinaryOperation},
        Error,
    },
    funcs::{linalg::vector_shape, to_integer},
    types::{binary_type, dimension_product, dimension_quotient, ResultType},
    value::{Matrix, Value},
};

/// The largest number of bits a shift can move.
const MAX_SHIFT: i64 = 63;

fn invalid(op: BinOpKind, left: &'static str, right: &'static str) -> Error {
    error(InvalidBinaryOperation { op, left, right })
}

/// Evaluates a comparison given the ordering of the operands.
fn compare<T: PartialOrd>(op: BinOpKind, left: T, right: T) -> Option<bool> {
    Some(match op {
        BinOpKind::Greater => left > right,
        BinOpKind::GreaterEq => left >= right,
        BinOpKind::Less => left < right,
        BinOpKind::LessEq => left <= right,
        BinOpKind::Eq => left == right,
        BinOpKind::NotEq => left != right,
        _ => return None,
    })
}

/// Evaluates a bitshift of two integers.
fn shift(op: BinOpKind, left: f64, right: f64) -> Result<f64, Error> {
    let name = op.symbol();
    let left = to_integer(name, left)?;
    let right = to_integer(name, right)?;
    if !(0..=MAX_SHIFT).contains(&right) {
        return Err(error(InvalidArgument {
            name,
            reason: format!("the shift amount must be between 0 and {}, found {}", MAX_SHIFT, right),
        }));
    }
    let shifted = match op {
        BinOpKind::BitLeft => left.wrapping_shl(right as u32),
        _ => left >> right,
    };
    Ok(shifted as f64)
}

/// Evaluates a binary expression with two real operands.
fn eval_number_operands(op: BinOpKind, left: f64, right: f64) -> Result<Value, Error> {
    Ok(match op {
        // `0^-n` is `1 / 0^n`
        BinOpKind::Exp if left == 0.0 && right < 0.0 => return Err(error(DivideByZero)),
        BinOpKind::Exp => left.powf(right).into(),
        BinOpKind::Mul => (left * right).into(),
        BinOpKind::Div | BinOpKind::Mod if right == 0.0 => return Err(error(DivideByZero)),
        BinOpKind::Div => (left / right).into(),
        BinOpKind::Mod => left.rem_euclid(right).into(),
        BinOpKind::Add => (left + right).into(),
        BinOpKind::Sub => (left - right).into(),
        BinOpKind::BitLeft | BinOpKind::BitRight => shift(op, left, right)?.into(),
        op => match compare(op, left, right) {
            Some(b) => b.into(),
            None => return Err(invalid(op, "number", "number")),
        },
    })
}

/// Evaluates a binary expression where at least one operand is complex.
fn eval_complex_operands(op: BinOpKind, left: Complex64, right: Complex64) -> Result<Value, Error> {
    Ok(match op {
        BinOpKind::Exp if left == Complex64::new(0.0, 0.0) && right.re < 0.0 => {
            return Err(error(DivideByZero));
        },
        // integer powers by repeated multiplication, so that `i^2` is exactly `-1`
        BinOpKind::Exp if right.im == 0.0 && right.re.fract() == 0.0 && right.re.abs() <= i32::MAX as f64 => {
            left.powi(right.re as i32).into()
        },
        BinOpKind::Exp => left.powc(right).into(),
        BinOpKind::Mul => (left * right).into(),
        BinOpKind::Div if right == Complex64::new(0.0, 0.0) => return Err(error(DivideByZero)),
        BinOpKind::Div => (left / right).into(),
        BinOpKind::Add => (left + right).into(),
        BinOpKind::Sub => (left - right).into(),
        BinOpKind::Eq => (left == right).into(),
        BinOpKind::NotEq => (left != right).into(),
        _ => return Err(invalid(op, "complex", "complex")),
    })
}

fn eval_boolean_operands(op: BinOpKind, left: bool, right: bool) -> Result<Value, Error> {
    Ok(Value::Boolean(match op {
        BinOpKind::And => left && right,
        BinOpKind::Or => left || right,
        BinOpKind::Implies => !left || right,
        BinOpKind::Biconditional | BinOpKind::Eq => left == right,
        BinOpKind::NotEq => left != right,
        _ => return Err(invalid(op, "boolean", "boolean")),
    }))
}

fn eval_str_operands(op: BinOpKind, left: String, right: String) -> Result<Value, Error> {
    match op {
        BinOpKind::Add => Ok(Value::Str(left + &right)),
        op => compare(op, left, right)
            .map(Value::Boolean)
            .ok_or_else(|| invalid(op, "string", "string")),
    }
}

/// Evaluates a binary expression with two quantities.
///
/// Sums and comparisons convert the right operand into the unit of the left. Products and
/// quotients of different dimensions are expressed in the base unit of the resulting dimension.
fn eval_quantity_operands(
    op: BinOpKind,
    left: Measurement,
    right: Measurement,
) -> Result<Value, Error> {
    let typename = "quantity";
    match op {
        BinOpKind::Add | BinOpKind::Sub => {
            let right = right
                .convert(left.unit)
                .map_err(|err| error(ConversionFailed { reason: err.to_string() }))?;
            let value = if op == BinOpKind::Add {
                left.value + right.value
            } else {
                left.value - right.value
            };
            Ok(Measurement::new(value, left.unit).into())
        },
        BinOpKind::Mul => {
            let dimension = dimension_product(left.dimension(), right.dimension())
                .ok_or_else(|| invalid(op, typename, typename))?;
            let value = left.base_value() * right.base_value();
            Ok(Measurement::new(value, Unit::base_of(dimension)).into())
        },
        BinOpKind::Div => {
            let divisor = right.base_value();
            if divisor == 0.0 {
                return Err(error(DivideByZero));
            }
            let value = left.base_value() / divisor;
            match dimension_quotient(left.dimension(), right.dimension()) {
                Some(ResultType::Number) => Ok(Value::Number(value)),
                Some(ResultType::Quantity(dimension)) => {
                    Ok(Measurement::new(value, Unit::base_of(dimension)).into())
                },
                _ => Err(invalid(op, typename, typename)),
            }
        },
        op => compare(op, left.base_value(), right.base_value())
            .map(Value::Boolean)
            .ok_or_else(|| invalid(op, typename, typename)),
    }
}

/// Evaluates a quantity multiplied or divided by a number.
fn eval_scaled_quantity(op: BinOpKind, quantity: Measurement, n: f64) -> Result<Value, Error> {
    let value = match op {
        BinOpKind::Mul => quantity.value * n,
        BinOpKind::Div if n == 0.0 => return Err(error(DivideByZero)),
        BinOpKind::Div => quantity.value / n,
        _ => return Err(invalid(op, "quantity", "number")),
    };
    Ok(Measurement::new(value, quantity.unit).into())
}

fn eval_vector_operands(op: BinOpKind, left: Vec<f64>, right: Vec<f64>) -> Result<Value, Error> {
    let verb = match op {
        BinOpKind::Add => "add",
        BinOpKind::Sub => "subtract",
        BinOpKind::Eq => return Ok(Value::Boolean(left == right)),
        BinOpKind::NotEq => return Ok(Value::Boolean(left != right)),
        _ => return Err(invalid(op, "vector", "vector")),
    };
    if left.len() != right.len() {
        return Err(error(DimensionMismatch {
            op: verb,
            left: vector_shape(&left),
            right: vector_shape(&right),
        }));
    }
    Ok(Value::Vector(
        left.iter()
            .zip(&right)
            .map(|(a, b)| if op == BinOpKind::Add { a + b } else { a - b })
            .collect(),
    ))
}

fn eval_matrix_operands(op: BinOpKind, left: Matrix, right: Matrix) -> Result<Value, Error> {
    Ok(match op {
        BinOpKind::Add => left.zip_with(&right, "add", |a, b| a + b)?.into(),
        BinOpKind::Sub => left.zip_with(&right, "subtract", |a, b| a - b)?.into(),
        BinOpKind::Mul => left.mul(&right)?.into(),
        BinOpKind::Eq => (left == right).into(),
        BinOpKind::NotEq => (left != right).into(),
        _ => return Err(invalid(op, "matrix", "matrix")),
    })
}

/// Evaluates a matrix or vector operated on by a scalar.
fn eval_scaled(op: BinOpKind, value: Value, n: f64) -> Result<Value, Error> {
    let scale = match op {
        BinOpKind::Mul => n,
        BinOpKind::Div if n == 0.0 => return Err(error(DivideByZero)),
        BinOpKind::Div => n.recip(),
        BinOpKind::Exp => match value {
            Value::Matrix(m) => return Ok(m.pow(to_integer("^", n)?)?.into()),
            value => return Err(invalid(op, value.typename(), "number")),
        },
        _ => return Err(invalid(op, value.typename(), "number")),
    };
    match value {
        Value::Vector(v) => Ok(Value::Vector(v.into_iter().map(|x| x * scale).collect())),
        Value::Matrix(m) => Ok(m.map(|x| x * scale).into()),
        value => Err(invalid(op, value.typename(), "number")),
    }
}

/// Applies the binary operator to two values.
pub fn eval_binary(op: BinOpKind, left: Value, right: Value) -> Result<Value, Error> {
    let (left_name, right_name) = (left.typename(), right.typename());
    if binary_type(op, left.result_type(), right.result_type()).is_none() {
        return Err(invalid(op, left_name, right_name));
    }

    match (left, right) {
        (Value::Number(l), Value::Number(r)) => eval_number_operands(op, l, r),
        (l @ (Value::Number(_) | Value::Complex(_)), r @ (Value::Number(_) | Value::Complex(_))) => {
            match (l.as_complex(), r.as_complex()) {
                (Some(l), Some(r)) => eval_complex_operands(op, l, r),
                _ => Err(invalid(op, left_name, right_name)),
            }
        },
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_operands(op, l, r),
        (Value::Str(l), Value::Str(r)) => eval_str_operands(op, l, r),
        (Value::Quantity(l), Value::Quantity(r)) => eval_quantity_operands(op, l, r),
        (Value::Quantity(q), Value::Number(n)) => eval_scaled_quantity(op, q, n),
        (Value::Number(n), Value::Quantity(q)) if op == BinOpKind::Mul => {
            eval_scaled_quantity(op, q, n)
        },
        (Value::Vector(l), Value::Vector(r)) => eval_vector_operands(op, l, r),
        (Value::Matrix(l), Value::Matrix(r)) => eval_matrix_operands(op, l, r),
        (Value::Matrix(m), Value::Vector(v)) if op == BinOpKind::Mul => {
            Ok(Value::Vector(m.mul_vector(&v)?))
        },
        (value @ (Value::Vector(_) | Value::Matrix(_)), Value::Number(n)) => eval_scaled(op, value, n),
        (Value::Number(n), value @ (Value::Vector(_) | Value::Matrix(_))) if op == BinOpKind::Mul => {
            eval_scaled(op, value, n)
        },
        _ => Err(invalid(op, left_name, right_name)),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use pretty_assertions::assert_eq;
    use symcalc_unit_convert::{Area, Dimension, Length, Volume};
    use super::*;

    fn feet(n: f64) -> Value {
        Measurement::new(n, Length::Foot).into()
    }

    #[test]
    fn divide_by_zero() {
        let err = eval_binary(BinOpKind::Div, 1.0.into(), 0.0.into()).unwrap_err();
        assert!(err.is::<DivideByZero>());
        let err = eval_binary(BinOpKind::Mod, 1.0.into(), 0.0.into()).unwrap_err();
        assert!(err.is::<DivideByZero>());
    }

    #[test]
    fn zero_to_a_negative_power() {
        let err = eval_binary(BinOpKind::Exp, 0.0.into(), (-1.0).into()).unwrap_err();
        assert!(err.is::<DivideByZero>());
        let err = eval_binary(BinOpKind::Exp, Complex64::new(0.0, 0.0).into(), (-2.0).into()).unwrap_err();
        assert!(err.is::<DivideByZero>());
        assert_eq!(eval_binary(BinOpKind::Exp, 0.0.into(), 0.0.into()).unwrap(), Value::Number(1.0));
        assert_eq!(eval_binary(BinOpKind::Exp, 0.0.into(), 2.0.into()).unwrap(), Value::Number(0.0));
    }

    #[test]
    fn modulo_is_euclidean() {
        assert_eq!(eval_binary(BinOpKind::Mod, (-1.0).into(), 3.0.into()).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn shifts() {
        assert_eq!(eval_binary(BinOpKind::BitLeft, 1.0.into(), 4.0.into()).unwrap(), Value::Number(16.0));
        assert_eq!(eval_binary(BinOpKind::BitRight, 16.0.into(), 2.0.into()).unwrap(), Value::Number(4.0));
        assert!(eval_binary(BinOpKind::BitLeft, 1.5.into(), 1.0.into()).is_err());
        assert!(eval_binary(BinOpKind::BitLeft, 1.0.into(), 64.0.into()).is_err());
    }

    #[test]
    fn mismatched_types() {
        let err = eval_binary(BinOpKind::Add, 1.0.into(), true.into()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidBinaryOperation>(),
            Some(&InvalidBinaryOperation { op: BinOpKind::Add, left: "number", right: "boolean" }),
        );
    }

    #[test]
    fn length_times_length_is_area() {
        let Value::Quantity(area) = eval_binary(BinOpKind::Mul, feet(2.0), feet(3.0)).unwrap() else {
            panic!("expected a quantity");
        };
        assert_eq!(area.dimension(), Dimension::Area);
        let square_feet = area.convert(Area::SquareFoot).unwrap();
        assert_float_relative_eq!(square_feet.value, 6.0);
    }

    #[test]
    fn length_times_area_is_volume() {
        let area = eval_binary(BinOpKind::Mul, feet(1.0), feet(1.0)).unwrap();
        let Value::Quantity(volume) = eval_binary(BinOpKind::Mul, area, feet(1.0)).unwrap() else {
            panic!("expected a quantity");
        };
        let cubic_feet = volume.convert(Volume::CubicFoot).unwrap();
        assert_float_relative_eq!(cubic_feet.value, 1.0);
    }

    #[test]
    fn sums_convert_to_left_unit() {
        let inches = Measurement::new(6.0, Length::Inch).into();
        let Value::Quantity(sum) = eval_binary(BinOpKind::Add, feet(1.0), inches).unwrap() else {
            panic!("expected a quantity");
        };
        assert_eq!(sum.unit, Unit::Length(Length::Foot));
        assert_float_relative_eq!(sum.value, 1.5);
    }

    #[test]
    fn complex_promotion() {
        let i = Value::Complex(Complex64::new(0.0, 1.0));
        assert_eq!(
            eval_binary(BinOpKind::Mul, i.clone(), i).unwrap(),
            Value::Complex(Complex64::new(-1.0, 0.0)),
        );
        assert_eq!(
            eval_binary(BinOpKind::Add, 1.0.into(), Complex64::new(0.0, 2.0).into()).unwrap(),
            Value::Complex(Complex64::new(1.0, 2.0)),
        );
    }

    #[test]
    fn matrix_vector_product() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(
            eval_binary(BinOpKind::Mul, m.into(), vec![1.0, 1.0].into()).unwrap(),
            Value::Vector(vec![3.0, 7.0]),
        );
    }
}
