//! Functions that reduce a list of numbers into one.
//!
//! Each function accepts either several numbers, or a single vector of numbers.

use symcalc_parser::parser::ast::Func;
use crate::{error::{error, kind::InvalidArgument, Error}, value::Value};
use super::invalid_arguments;

/// Collects the arguments into a list of numbers.
fn numbers(args: &[Value]) -> Option<Vec<f64>> {
    match args {
        [Value::Vector(v)] => Some(v.clone()),
        args => args.iter().map(Value::as_number).collect(),
    }
}

fn require(name: &'static str, values: &[f64], at_least: usize) -> Result<(), Error> {
    if values.len() < at_least {
        return Err(error(InvalidArgument {
            name,
            reason: format!("expected at least {} values, found {}", at_least, values.len()),
        }));
    }
    Ok(())
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// The sample variance, using Bessel's correction.
pub fn variance(values: &[f64]) -> f64 {
    let mean = mean(values);
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    let Some(values) = numbers(args) else {
        return Err(invalid_arguments(func, args));
    };
    let name = func.name();
    Ok(Value::Number(match func {
        Func::Sum => values.iter().sum(),
        Func::Mean => {
            require(name, &values, 1)?;
            mean(&values)
        },
        Func::Median => {
            require(name, &values, 1)?;
            median(&values)
        },
        Func::Min => {
            require(name, &values, 1)?;
            values.iter().copied().fold(f64::INFINITY, f64::min)
        },
        Func::Max => {
            require(name, &values, 1)?;
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        },
        Func::Variance => {
            require(name, &values, 2)?;
            variance(&values)
        },
        Func::Stdev => {
            require(name, &values, 2)?;
            variance(&values).sqrt()
        },
        _ => return Err(invalid_arguments(func, args)),
    }))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use super::*;

    fn call_numbers(func: Func, values: &[f64]) -> Result<f64, Error> {
        let args = values.iter().copied().map(Value::Number).collect::<Vec<_>>();
        call(func, &args).map(|value| value.as_number().unwrap())
    }

    #[test]
    fn summary_statistics() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_float_relative_eq!(call_numbers(Func::Mean, &data).unwrap(), 5.0);
        assert_float_relative_eq!(call_numbers(Func::Median, &data).unwrap(), 4.5);
        assert_float_relative_eq!(call_numbers(Func::Variance, &data).unwrap(), 32.0 / 7.0);
        assert_float_relative_eq!(call_numbers(Func::Max, &data).unwrap(), 9.0);
    }

    #[test]
    fn vector_argument() {
        let value = call(Func::Sum, &[Value::Vector(vec![1.0, 2.0, 3.5])]).unwrap();
        assert_eq!(value, Value::Number(6.5));
    }

    #[test]
    fn too_few_values() {
        let err = call_numbers(Func::Stdev, &[1.0]).unwrap_err();
        assert!(err.is::<InvalidArgument>());
        let err = call(Func::Max, &[Value::Vector(Vec::new())]).unwrap_err();
        assert!(err.is::<InvalidArgument>());
    }
}
