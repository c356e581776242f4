use symcalc_parser::parser::ast::Func;
use crate::{error::Error, value::Value};
use super::{invalid_arguments, to_integer, to_natural};

/// Any factorial above this overflows an `f64`.
const MAX_FACTORIAL: u64 = 170;

/// Computes `n!`. The argument must be a non-negative integer.
pub fn factorial(n: f64) -> Result<f64, Error> {
    let n = to_natural("factorial", n)?;
    if n > MAX_FACTORIAL {
        return Ok(f64::INFINITY);
    }
    Ok((2..=n).map(|k| k as f64).product())
}

fn gcd_pair(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn gcd(values: &[i64]) -> u64 {
    values.iter().fold(0, |acc, x| gcd_pair(acc, x.unsigned_abs()))
}

pub fn lcm(values: &[i64]) -> f64 {
    values.iter().fold(1.0, |acc: f64, x| {
        let x = x.unsigned_abs();
        if acc == 0.0 || x == 0 {
            return 0.0;
        }
        let divisor = gcd_pair(acc as u64, x);
        acc / divisor as f64 * x as f64
    })
}

/// The number of ways to choose `k` of `n` items, ignoring order.
pub fn ncr(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut acc = 1.0;
    for i in 0..k {
        // the partial products only grow, so stop once they overflow
        acc = acc * (n - i) as f64 / (i + 1) as f64;
        if acc.is_infinite() {
            return acc;
        }
    }
    acc.round()
}

/// The number of ways to arrange `k` of `n` items.
pub fn npr(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut acc = 1.0;
    for i in 0..k {
        acc *= (n - i) as f64;
        if acc.is_infinite() {
            return acc;
        }
    }
    acc
}

pub fn call(func: Func, args: &[Value]) -> Result<Value, Error> {
    let name = func.name();
    let numbers = args.iter().map(Value::as_number).collect::<Option<Vec<_>>>();
    let Some(numbers) = numbers else {
        return Err(invalid_arguments(func, args));
    };

    Ok(Value::Number(match (func, numbers.as_slice()) {
        (Func::Factorial, [n]) => factorial(*n)?,
        (Func::Gcd | Func::Lcm, numbers) => {
            let integers = numbers
                .iter()
                .map(|n| to_integer(name, *n))
                .collect::<Result<Vec<_>, _>>()?;
            if func == Func::Gcd {
                gcd(&integers) as f64
            } else {
                lcm(&integers)
            }
        },
        (Func::Ncr, [n, k]) => ncr(to_natural(name, *n)?, to_natural(name, *k)?),
        (Func::Npr, [n, k]) => npr(to_natural(name, *n)?, to_natural(name, *k)?),
        _ => return Err(invalid_arguments(func, args)),
    }))
}
