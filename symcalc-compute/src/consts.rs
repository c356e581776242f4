//! Constants every default symbol table starts with.

use num_complex::Complex64;
use once_cell::sync::Lazy;
use std::f64::consts;
use crate::value::Value;

/// The golden ratio.
pub static PHI: Lazy<f64> = Lazy::new(|| (1.0 + 5f64.sqrt()) / 2.0);

/// The imaginary unit.
pub static I: Lazy<Complex64> = Lazy::new(|| Complex64::new(0.0, 1.0));

/// The constants bound in a default symbol table, by name.
pub static CONSTANTS: Lazy<Vec<(&'static str, Value)>> = Lazy::new(|| vec![
    ("pi", consts::PI.into()),
    ("π", consts::PI.into()),
    ("e", consts::E.into()),
    ("tau", consts::TAU.into()),
    ("phi", (*PHI).into()),
    ("i", (*I).into()),
]);

/// Returns the value of the named constant.
pub fn get(name: &str) -> Option<&'static Value> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|(_, value)| value)
}
