//! Evaluation and symbolic manipulation of symcalc expressions.
//!
//! This crate consumes the trees produced by [`symcalc_parser`] in two ways:
//!
//! - The [`eval`] module interprets a tree directly against a symbol table, producing a
//!   [`Value`].
//! - The [`symbolic`] module holds whole-tree passes that never evaluate anything: the
//!   [`Differentiator`](symbolic::Differentiator), the [`Simplifier`](symbolic::Simplifier), and
//!   the [`TypeAnalyzer`](symbolic::TypeAnalyzer).
//!
//! ```
//! use symcalc_compute::{evaluate, symbolic::differentiate, Value};
//! use symcalc_parser::parse;
//!
//! let expr = parse("2 + 3 * 4").unwrap();
//! assert_eq!(evaluate(&expr).unwrap(), Value::Number(14.0));
//!
//! let derivative = differentiate(&parse("x^2").unwrap(), "x").unwrap();
//! assert_eq!(derivative.to_string(), "2 * x");
//! ```

pub mod consts;
pub mod ctxt;
pub mod error;
pub mod eval;
pub mod funcs;
pub mod symbolic;
pub mod trig_mode;
pub mod types;
pub mod value;

pub use ctxt::{Access, Bindings, ScopedTable, SymbolTable};
pub use eval::{evaluate, execute, Eval};
pub use symbolic::{analyze, Analyzer};
pub use trig_mode::TrigMode;
pub use types::ResultType;
pub use value::Value;
