//! The executor, which evaluates expression trees to values.
//!
//! Children are evaluated before their parent, left to right. The exception is `if`, which only
//! evaluates the branch its condition selects.

pub mod binary;
pub mod call;
pub mod special;
pub mod unary;

use symcalc_parser::parser::ast::Expr;
use symcalc_unit_convert::Measurement;
use tracing::{debug, trace};
use crate::{
    ctxt::{Bindings, SymbolTable},
    error::{
        error,
        kind::{DimensionMismatch, InvalidCondition, InvalidElement, UndefinedVariable},
        Error,
    },
    funcs,
    value::{Lambda, Matrix, Value},
};
use special::Series;

/// Any type that can be evaluated to produce a [`Value`].
pub trait Eval {
    /// Evaluate the expression to produce a value, using the given bindings.
    fn eval(&self, bindings: &mut dyn Bindings) -> Result<Value, Error>;
}

/// Executes the expression with the given bindings. Assignments and function definitions are
/// written to `bindings`.
pub fn execute(expr: &Expr, bindings: &mut dyn Bindings) -> Result<Value, Error> {
    trace!(%expr, "executing");
    expr.eval(bindings)
}

/// Executes the expression with a fresh [`SymbolTable::default`].
pub fn evaluate(expr: &Expr) -> Result<Value, Error> {
    execute(expr, &mut SymbolTable::default())
}

/// Evaluates the elements of a vector or matrix row, all of which must be real numbers.
fn eval_elements(elements: &[Expr], bindings: &mut dyn Bindings) -> Result<Vec<f64>, Error> {
    elements.iter()
        .map(|element| match element.eval(bindings)? {
            Value::Number(n) => Ok(n),
            other => Err(error(InvalidElement { found: other.typename() })),
        })
        .collect()
}

impl Eval for Expr {
    fn eval(&self, bindings: &mut dyn Bindings) -> Result<Value, Error> {
        match self {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Quantity(n, unit) => Ok(Measurement::new(*n, *unit).into()),
            Expr::Symbol(name) => match bindings.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(error(UndefinedVariable {
                    name: name.clone(),
                    suggestions: bindings.similar_names(name),
                })),
            },
            Expr::Vector(elements) => Ok(Value::Vector(eval_elements(elements, bindings)?)),
            Expr::Matrix(rows) => {
                let rows = rows.iter()
                    .map(|row| eval_elements(row, bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                let first = rows.first().map_or(0, Vec::len);
                let ragged = rows.iter().find(|row| row.len() != first).map(Vec::len);
                match Matrix::from_rows(rows) {
                    Some(matrix) => Ok(matrix.into()),
                    None => Err(error(DimensionMismatch {
                        op: "stack",
                        left: format!("row of length {}", first),
                        right: format!("row of length {}", ragged.unwrap_or_default()),
                    })),
                }
            },
            Expr::Unary(op, operand) => {
                let operand = operand.eval(bindings)?;
                unary::eval_unary(*op, operand)
            },
            Expr::Binary(op, lhs, rhs) => {
                let left = lhs.eval(bindings)?;
                let right = rhs.eval(bindings)?;
                binary::eval_binary(*op, left, right)
            },
            Expr::Func(func, args) => {
                let args = args.iter()
                    .map(|arg| arg.eval(bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                funcs::call(*func, args, bindings.trig_mode())
            },
            Expr::Call(name, args) => call::eval_call(name, args, bindings),
            Expr::If(condition, then, otherwise) => match condition.eval(bindings)? {
                Value::Boolean(true) => then.eval(bindings),
                Value::Boolean(false) => otherwise.eval(bindings),
                other => Err(error(InvalidCondition { found: other.typename() })),
            },
            Expr::Convert(value, unit) => special::eval_convert(value.eval(bindings)?, unit),
            Expr::Assign(name, value) => {
                let value = value.eval(bindings)?;
                bindings.set(name, value.clone())?;
                debug!(name = name.as_str(), %value, "assigned variable");
                Ok(value)
            },
            Expr::FuncDef(name, params, body) => {
                let lambda = Value::Lambda(Lambda { params: params.clone(), body: (**body).clone() });
                bindings.set(name, lambda.clone())?;
                debug!(name = name.as_str(), ?params, "defined function");
                Ok(lambda)
            },
            Expr::Summation(var, from, to, body) => {
                special::eval_series(Series::Summation, var, from, to, body, bindings)
            },
            Expr::Product(var, from, to, body) => {
                special::eval_series(Series::Product, var, from, to, body, bindings)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use num_complex::Complex64;
    use pretty_assertions::assert_eq;
    use symcalc_parser::parse;
    use crate::{
        ctxt::Access,
        error::kind::{AssignConstant, NotCallable, StackOverflow, UndefinedFunction, WrongArgumentCount},
        trig_mode::TrigMode,
    };
    use super::*;

    /// Evaluates the given source with a default symbol table.
    fn eval(source: &str) -> Result<Value, Error> {
        evaluate(&parse(source).unwrap())
    }

    /// Evaluates each line of the source in order, sharing one symbol table, and returns the value
    /// of the last line.
    fn eval_lines(source: &str) -> Result<Value, Error> {
        let mut table = SymbolTable::default();
        let mut last = Value::Number(0.0);
        for line in source.lines().map(str::trim).filter(|line| !line.is_empty()) {
            last = execute(&parse(line).unwrap(), &mut table)?;
        }
        Ok(last)
    }

    fn number(source: &str) -> f64 {
        eval(source).unwrap().as_number().unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(number("1 + 2 * 3"), 7.0);
        assert_eq!(number("2^3^2"), 512.0);
        assert_eq!(number("(-2)^2"), 4.0);
        assert_eq!(number("10 % 4"), 2.0);
        assert_eq!(number("5!"), 120.0);
    }

    #[test]
    fn implicit_multiplication() {
        let mut table = SymbolTable::default();
        table.insert("x", 4.0, Access::Mutable);
        let value = execute(&parse("3x + 2x^2").unwrap(), &mut table).unwrap();
        assert_eq!(value, Value::Number(44.0));
    }

    #[test]
    fn constants() {
        assert_float_relative_eq!(number("2pi"), std::f64::consts::TAU);
        assert_float_relative_eq!(number("ln(e)"), 1.0);
        assert_eq!(eval("i^2").unwrap(), Value::Complex(Complex64::new(-1.0, 0.0)));
    }

    #[test]
    fn undefined_variable_suggests() {
        let err = eval_lines("width = 2\nwidht + 1").unwrap_err();
        let kind = err.downcast_ref::<UndefinedVariable>().unwrap();
        assert_eq!(kind.name, "widht");

        let err = eval("ta").unwrap_err();
        assert_eq!(err.downcast_ref::<UndefinedVariable>().unwrap().suggestions, vec!["tau"]);
    }

    #[test]
    fn undefined_function_suggests() {
        let err = eval("sine(2)").unwrap_err();
        let kind = err.downcast_ref::<UndefinedFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin", "sinh"]);
    }

    #[test]
    fn cannot_assign_constants() {
        let err = eval("pi = 3").unwrap_err();
        assert!(err.is::<AssignConstant>());
    }

    #[test]
    fn assignment_persists() {
        assert_eq!(eval_lines("x = 3\ny = x^2\ny - x").unwrap(), Value::Number(6.0));
    }

    #[test]
    fn user_functions() {
        assert_eq!(eval_lines("f(x) = x^2 + 1\nf(3)").unwrap(), Value::Number(10.0));
        assert_eq!(eval_lines("g(a, b) = a - b\ng(5, 2)").unwrap(), Value::Number(3.0));
        assert_eq!(
            eval_lines("fact(n) = if(n <= 1, 1, n * fact(n - 1))\nfact(10)").unwrap(),
            Value::Number(3628800.0),
        );
    }

    #[test]
    fn parameters_do_not_leak() {
        let err = eval_lines("f(x) = x + 1\nf(2)\nx").unwrap_err();
        assert!(err.is::<UndefinedVariable>());
    }

    #[test]
    fn free_names_resolve_where_defined() {
        assert_eq!(
            eval_lines("a = 1\nf(x) = a * x\ng(a) = f(2)\ng(10)").unwrap(),
            Value::Number(2.0),
        );
        assert_eq!(
            eval_lines("a = 1\nf(x) = a * x\nsummation(a, 1, 3, f(1))").unwrap(),
            Value::Number(3.0),
        );
    }

    #[test]
    fn wrong_argument_count() {
        let err = eval_lines("f(x) = x\nf(1, 2)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<WrongArgumentCount>(),
            Some(&WrongArgumentCount { name: "f".to_string(), expected: 1, given: 2 }),
        );
    }

    #[test]
    fn not_callable() {
        let err = eval_lines("x = 2\nx(3)").unwrap_err();
        assert!(err.is::<NotCallable>());
    }

    #[test]
    fn runaway_recursion() {
        // deep recursion needs more stack than the default test thread has
        let result = std::thread::Builder::new()
            .stack_size(64 << 20)
            .spawn(|| eval_lines("f(x) = f(x + 1)\nf(0)").map(|_| ()))
            .unwrap()
            .join()
            .unwrap();
        assert!(result.unwrap_err().is::<StackOverflow>());
    }

    #[test]
    fn conditional_skips_untaken_branch() {
        assert_eq!(number("if(1 < 2, 1, 1 / 0)"), 1.0);
        let err = eval("if(1, 2, 3)").unwrap_err();
        assert!(err.is::<InvalidCondition>());
    }

    #[test]
    fn series() {
        assert_eq!(number("summation(k, 1, 100, k)"), 5050.0);
        assert_eq!(number("product(k, 1, 5, k)"), 120.0);
        assert_eq!(number("summation(k, 5, 1, k)"), 0.0);
        assert_eq!(number("product(k, 5, 1, k)"), 1.0);
        assert!(eval("summation(k, 1.5, 3, k)").is_err());
    }

    #[test]
    fn series_index_is_scoped() {
        let err = eval_lines("summation(k, 1, 3, k)\nk").unwrap_err();
        assert!(err.is::<UndefinedVariable>());
        assert_eq!(eval_lines("k = 10\nsummation(k, 1, 3, k)\nk").unwrap(), Value::Number(10.0));
    }

    #[test]
    fn trig_mode() {
        let mut table = SymbolTable::default().with_trig_mode(TrigMode::Degrees);
        let value = execute(&parse("sin(90)").unwrap(), &mut table).unwrap();
        assert_float_relative_eq!(value.as_number().unwrap(), 1.0);
        let value = execute(&parse("acos(0)").unwrap(), &mut table).unwrap();
        assert_float_relative_eq!(value.as_number().unwrap(), 90.0);
    }

    #[test]
    fn quantities() {
        assert_eq!(eval("convert(3 ft, in)").unwrap().to_string(), "36 inch");
        assert_eq!(eval("convert(2 ft * 3 ft, ft2)").unwrap().to_string(), "6 ft2");
        assert!(eval("convert(3 ft, kg)").is_err());
        assert!(eval("convert(3, ft)").is_err());
    }

    #[test]
    fn vectors_and_matrices() {
        assert_eq!(eval("{1, 2} + {3, 4}").unwrap(), Value::Vector(vec![4.0, 6.0]));
        assert_eq!(number("det({{1, 2}, {3, 4}})"), -2.0);
        assert_eq!(eval("{{1, 2}, {3, 4}} * {1, 1}").unwrap(), Value::Vector(vec![3.0, 7.0]));
        assert!(eval("{1, 2} + {1, 2, 3}").unwrap_err().is::<DimensionMismatch>());
        assert!(eval("{1, true}").unwrap_err().is::<InvalidElement>());
    }

    #[test]
    fn strings_and_logic() {
        assert_eq!(eval("\"ab\" + \"c\"").unwrap(), Value::Str("abc".to_string()));
        assert_eq!(eval("true -> false").unwrap(), Value::Boolean(false));
        assert_eq!(eval("false <-> false").unwrap(), Value::Boolean(true));
        assert_eq!(eval("!(1 > 2) & 3 >= 3").unwrap(), Value::Boolean(true));
    }
}
