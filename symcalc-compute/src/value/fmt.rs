//! Formatting of values for display to the user.

use num_complex::Complex64;
use std::fmt::{Display, Formatter, Result};
use super::Value;

/// The number of significant digits shown when formatting a real number.
const SIGNIFICANT_DIGITS: i32 = 12;

/// Formats a real number, rounding away floating-point noise and dropping trailing zeros.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs().log10().floor() as i32;
    if !(-9..15).contains(&magnitude) {
        return format!("{:e}", n);
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let formatted = format!("{:.*}", decimals, n);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        &formatted
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a complex number as `a + bi`, omitting whichever part is zero.
pub fn format_complex(c: Complex64) -> String {
    let imaginary = |im: f64| match im {
        im if im == 1.0 => "i".to_string(),
        im if im == -1.0 => "-i".to_string(),
        im => format!("{}i", format_number(im)),
    };
    match (c.re, c.im) {
        (re, im) if im == 0.0 => format_number(re),
        (re, im) if re == 0.0 => imaginary(im),
        (re, im) if im < 0.0 => format!("{} - {}", format_number(re), imaginary(-im)),
        (re, im) => format!("{} + {}", format_number(re), imaginary(im)),
    }
}

fn fmt_numbers(f: &mut Formatter, numbers: &[f64]) -> Result {
    write!(f, "{{")?;
    for (i, n) in numbers.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", format_number(*n))?;
    }
    write!(f, "}}")
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Complex(c) => write!(f, "{}", format_complex(*c)),
            Value::Quantity(m) => write!(f, "{} {}", format_number(m.value), m.unit),
            Value::Vector(v) => fmt_numbers(f, v),
            Value::Matrix(m) => {
                write!(f, "{{")?;
                for i in 0..m.rows() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt_numbers(f, m.row(i))?;
                }
                write!(f, "}}")
            },
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Lambda(lambda) => write!(f, "({}) => {}", lambda.params.join(", "), lambda.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_number(1e20), "1e20");
        assert_eq!(format_number(-1.5e-20), "-1.5e-20");
    }

    #[test]
    fn complex() {
        assert_eq!(format_complex(Complex64::new(3.0, 4.0)), "3 + 4i");
        assert_eq!(format_complex(Complex64::new(3.0, -1.0)), "3 - i");
        assert_eq!(format_complex(Complex64::new(0.0, 2.0)), "2i");
        assert_eq!(format_complex(Complex64::new(5.0, 0.0)), "5");
    }
}
