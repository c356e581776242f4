use symcalc_parser::parser::token::op::UnaryOpKind;
use symcalc_unit_convert::Measurement;
use crate::{
    error::{error, kind::InvalidUnaryOperation, Error},
    funcs::combinatoric::factorial,
    types::unary_type,
    value::Value,
};

/// Applies the unary operator to a value.
pub fn eval_unary(op: UnaryOpKind, operand: Value) -> Result<Value, Error> {
    let invalid = |operand: &Value| error(InvalidUnaryOperation { op, operand: operand.typename() });
    if unary_type(op, operand.result_type()).is_none() {
        return Err(invalid(&operand));
    }

    Ok(match (op, operand) {
        (UnaryOpKind::Neg, Value::Number(n)) => Value::Number(-n),
        (UnaryOpKind::Neg, Value::Complex(z)) => Value::Complex(-z),
        (UnaryOpKind::Neg, Value::Quantity(m)) => Measurement::new(-m.value, m.unit).into(),
        (UnaryOpKind::Neg, Value::Vector(v)) => Value::Vector(v.into_iter().map(|x| -x).collect()),
        (UnaryOpKind::Neg, Value::Matrix(m)) => m.map(|x| -x).into(),
        (UnaryOpKind::Not, Value::Boolean(b)) => Value::Boolean(!b),
        (UnaryOpKind::Factorial, Value::Number(n)) => Value::Number(factorial(n)?),
        (_, operand) => return Err(invalid(&operand)),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn negate_vector() {
        assert_eq!(
            eval_unary(UnaryOpKind::Neg, vec![1.0, -2.0].into()).unwrap(),
            Value::Vector(vec![-1.0, 2.0]),
        );
    }

    #[test]
    fn not_requires_boolean() {
        let err = eval_unary(UnaryOpKind::Not, 1.0.into()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidUnaryOperation>(),
            Some(&InvalidUnaryOperation { op: UnaryOpKind::Not, operand: "number" }),
        );
    }
}
