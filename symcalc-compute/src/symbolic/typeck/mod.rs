//! Static type inference.
//!
//! The [`TypeAnalyzer`] infers the [`ResultType`] of an expression from the operator and function
//! tables in [`crate::types`], without evaluating anything. A variable whose type is not known
//! infers to [`ResultType::Undefined`], and an undefined operand takes on whatever type makes its
//! parent well-typed. If no type can make a node well-typed, inference fails with a type error,
//! and so does executing the expression.
//!
//! Inference is sound in both directions: if a node infers to a concrete type, executing it with
//! values of the inferred types never fails because of a type error, and if inference rejects an
//! expression, executing it fails as well. To keep the second direction, errors inside a branch
//! of `if`, or inside the body of a series, are only reported when that part is certain to run.

use std::str::FromStr;
use symcalc_parser::parser::{
    ast::{Expr, Func},
    token::op::{BinOpKind, UnaryOpKind},
};
use symcalc_unit_convert::Unit;
use tracing::debug;
use crate::{
    consts,
    ctxt::Bindings,
    error::{
        error,
        kind::{ArgumentTypeMismatch, ExpectedType, TypeMismatch, UnaryTypeMismatch},
        Error,
    },
    types::{binary_type, func_type, unary_type, ResultType},
};
use super::Analyzer;

/// Infers the static type of expressions.
#[derive(Default)]
pub struct TypeAnalyzer<'a> {
    /// The bindings whose values give variables their types.
    bindings: Option<&'a dyn Bindings>,

    /// Variables bound by enclosing series, innermost last.
    locals: Vec<(String, ResultType)>,
}

impl<'a> TypeAnalyzer<'a> {
    /// Creates an analyzer that only knows the built-in constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer that types each bound variable as its current value.
    pub fn with_bindings(bindings: &'a dyn Bindings) -> Self {
        Self { bindings: Some(bindings), locals: Vec::new() }
    }

    /// Infers the type of the given expression.
    pub fn infer(&mut self, expr: &Expr) -> Result<ResultType, Error> {
        let ty = self.infer_node(expr)?;
        debug!(%expr, %ty, "inferred type");
        Ok(ty)
    }

    /// Returns the type of the named variable.
    fn symbol(&self, name: &str) -> ResultType {
        if let Some((_, ty)) = self.locals.iter().rev().find(|(local, _)| local == name) {
            return *ty;
        }
        self.bindings
            .and_then(|bindings| bindings.get(name))
            .or_else(|| consts::get(name))
            .map_or(ResultType::Undefined, |value| value.result_type())
    }

    fn infer_node(&mut self, expr: &Expr) -> Result<ResultType, Error> {
        match expr {
            Expr::Number(_) => Ok(ResultType::Number),
            Expr::Boolean(_) => Ok(ResultType::Boolean),
            Expr::Str(_) => Ok(ResultType::Str),
            Expr::Quantity(_, unit) => Ok(ResultType::Quantity(unit.dimension())),
            Expr::Symbol(name) => Ok(self.symbol(name)),
            Expr::Vector(elements) => {
                self.elements(elements)?;
                Ok(ResultType::Vector)
            },
            Expr::Matrix(rows) => {
                for row in rows {
                    self.elements(row)?;
                }
                Ok(ResultType::Matrix)
            },
            Expr::Unary(op, operand) => {
                let operand = self.infer_node(operand)?;
                unary(*op, operand)
            },
            Expr::Binary(op, lhs, rhs) => {
                let left = self.infer_node(lhs)?;
                let right = self.infer_node(rhs)?;
                binary(*op, left, right)
            },
            Expr::Func(func, args) => {
                let args = args.iter()
                    .map(|arg| self.infer_node(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                function(*func, &args)
            },
            Expr::Call(_, args) => {
                for arg in args {
                    self.infer_node(arg)?;
                }
                Ok(ResultType::Undefined)
            },
            Expr::If(condition, then, otherwise) => self.conditional(condition, then, otherwise),
            Expr::Convert(value, unit) => {
                let value = self.infer_node(value)?;
                convert(value, unit)
            },
            Expr::Assign(_, value) => self.infer_node(value),
            Expr::FuncDef(..) => Ok(ResultType::Undefined),
            Expr::Summation(index, from, to, body) => {
                self.series(BinOpKind::Add, index, from, to, body)
            },
            Expr::Product(index, from, to, body) => {
                self.series(BinOpKind::Mul, index, from, to, body)
            },
        }
    }

    /// Checks the elements of a vector or matrix row, which must be real numbers.
    fn elements(&mut self, elements: &[Expr]) -> Result<(), Error> {
        for element in elements {
            match self.infer_node(element)? {
                ResultType::Number | ResultType::Undefined => (),
                found => return Err(error(ExpectedType { expected: "a real number", found })),
            }
        }
        Ok(())
    }

    fn conditional(&mut self, condition: &Expr, then: &Expr, otherwise: &Expr) -> Result<ResultType, Error> {
        // only the selected branch of a literal condition is ever executed
        if let Expr::Boolean(taken) = condition {
            return self.infer_node(if *taken { then } else { otherwise });
        }

        match self.infer_node(condition)? {
            ResultType::Boolean | ResultType::Undefined => (),
            found => return Err(error(ExpectedType { expected: "a boolean condition", found })),
        }

        // an undefined branch unifies with a concrete sibling
        match (self.infer_node(then), self.infer_node(otherwise)) {
            (Ok(a), Ok(b)) if a == b => Ok(a),
            (Ok(ResultType::Undefined), Ok(ty)) | (Ok(ty), Ok(ResultType::Undefined)) => Ok(ty),
            (Ok(_), Ok(_)) | (Ok(_), Err(_)) | (Err(_), Ok(_)) => Ok(ResultType::Undefined),
            (Err(err), Err(_)) => Err(err),
        }
    }

    fn series(
        &mut self,
        op: BinOpKind,
        index: &str,
        from: &Expr,
        to: &Expr,
        body: &Expr,
    ) -> Result<ResultType, Error> {
        for bound in [from, to] {
            match self.infer_node(bound)? {
                ResultType::Number | ResultType::Undefined => (),
                found => return Err(error(ExpectedType { expected: "an integer bound", found })),
            }
        }

        // number of terms, when both bounds are literals
        let terms = match (from.as_number(), to.as_number()) {
            (Some(from), Some(to)) => Some((to.floor() - from.ceil() + 1.0).max(0.0)),
            _ => None,
        };

        self.locals.push((index.to_owned(), ResultType::Number));
        let body = self.infer_node(body);
        self.locals.pop();

        let body = match (body, terms) {
            (Ok(body), _) => body,
            (Err(_), Some(terms)) if terms == 0.0 => return Ok(ResultType::Number),
            (Err(err), Some(_)) => return Err(err),
            (Err(_), None) => return Ok(ResultType::Undefined),
        };

        match terms {
            Some(terms) if terms == 0.0 => Ok(ResultType::Number),
            Some(terms) if terms == 1.0 => Ok(body),
            _ if !body.is_concrete() => Ok(ResultType::Undefined),
            Some(_) => match binary_type(op, body, body) {
                Some(ty) if ty == body => Ok(body),
                Some(_) => Ok(ResultType::Undefined),
                None => Err(error(TypeMismatch { op, left: body, right: body })),
            },
            // an empty range produces the number 0 or 1
            None if body == ResultType::Number => Ok(ResultType::Number),
            None => Ok(ResultType::Undefined),
        }
    }
}

/// Infers the type of a unary operation. An undefined operand of an arithmetic operation is
/// taken to be a number.
fn unary(op: UnaryOpKind, operand: ResultType) -> Result<ResultType, Error> {
    if !operand.is_concrete() {
        return Ok(match op {
            UnaryOpKind::Neg => ResultType::Number,
            UnaryOpKind::Not => ResultType::Boolean,
            UnaryOpKind::Factorial => ResultType::Number,
        });
    }
    unary_type(op, operand).ok_or_else(|| error(UnaryTypeMismatch { op, operand }))
}

/// Infers the type of a binary operation, unifying an undefined operand with the other.
fn binary(op: BinOpKind, left: ResultType, right: ResultType) -> Result<ResultType, Error> {
    let mismatch = || error(TypeMismatch { op, left, right });
    match (left.is_concrete(), right.is_concrete()) {
        (true, true) => binary_type(op, left, right).ok_or_else(mismatch),
        (false, false) => {
            if op.is_comparison() || op.is_logical() {
                Ok(ResultType::Undefined)
            } else {
                Ok(ResultType::Number)
            }
        },
        (true, false) => binary_type(op, left, left)
            .or_else(|| candidates(left).find_map(|c| binary_type(op, left, c)))
            .ok_or_else(mismatch),
        (false, true) => binary_type(op, right, right)
            .or_else(|| candidates(right).find_map(|c| binary_type(op, c, right)))
            .ok_or_else(mismatch),
    }
}

/// Infers the type of a call to a builtin function. Every undefined argument is given the same
/// type, the first one that makes the call well-typed.
fn function(func: Func, args: &[ResultType]) -> Result<ResultType, Error> {
    let mismatch = || error(ArgumentTypeMismatch { name: func.name(), given: args.to_vec() });
    if args.iter().all(ResultType::is_concrete) {
        return func_type(func, args).ok_or_else(mismatch);
    }

    let sibling = args.iter()
        .copied()
        .find(ResultType::is_concrete)
        .unwrap_or(ResultType::Number);
    candidates(sibling)
        .find_map(|candidate| {
            let unified = args.iter()
                .map(|arg| if arg.is_concrete() { *arg } else { candidate })
                .collect::<Vec<_>>();
            func_type(func, &unified)
        })
        .ok_or_else(mismatch)
}

/// Infers the type of a unit conversion.
fn convert(value: ResultType, unit: &str) -> Result<ResultType, Error> {
    let target = Unit::from_str(unit).ok().map(|unit| unit.dimension());
    match (value, target) {
        (ResultType::Quantity(dimension), Some(target)) if dimension == target => {
            Ok(ResultType::Quantity(target))
        },
        (ResultType::Quantity(dimension), _) => Ok(ResultType::Quantity(dimension)),
        (ResultType::Undefined, Some(target)) => Ok(ResultType::Quantity(target)),
        (ResultType::Undefined, None) => Ok(ResultType::Undefined),
        (found, _) => Err(error(ExpectedType { expected: "a quantity", found })),
    }
}

/// The types an undefined operand is tried as, starting with the type of its sibling.
fn candidates(first: ResultType) -> impl Iterator<Item = ResultType> {
    std::iter::once(first).chain(ResultType::CONCRETE.iter().copied())
}

impl Analyzer for TypeAnalyzer<'_> {
    type Output = ResultType;

    fn analyze(&mut self, expr: &Expr) -> Result<ResultType, Error> {
        self.infer(expr)
    }
}

/// Infers the type of the given expression, knowing only the built-in constants.
pub fn infer(expr: &Expr) -> Result<ResultType, Error> {
    TypeAnalyzer::new().infer(expr)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symcalc_parser::parse;
    use symcalc_unit_convert::Dimension;
    use crate::{
        ctxt::{Access, SymbolTable},
        eval::execute,
        value::Value,
    };
    use super::*;

    fn infer_str(source: &str) -> Result<ResultType, Error> {
        infer(&parse(source).unwrap())
    }

    fn ty(source: &str) -> ResultType {
        infer_str(source).unwrap_or_else(|err| panic!("`{}` failed to type: {:?}", source, err))
    }

    #[test]
    fn literals() {
        assert_eq!(ty("2.5"), ResultType::Number);
        assert_eq!(ty("true"), ResultType::Boolean);
        assert_eq!(ty("\"hi\""), ResultType::Str);
        assert_eq!(ty("{1, 2, 3}"), ResultType::Vector);
        assert_eq!(ty("{{1, 2}, {3, 4}}"), ResultType::Matrix);
        assert_eq!(ty("5 m"), ResultType::Quantity(Dimension::Length));
    }

    #[test]
    fn constants() {
        assert_eq!(ty("pi"), ResultType::Number);
        assert_eq!(ty("i"), ResultType::Complex);
        assert_eq!(ty("2 * i + 1"), ResultType::Complex);
        assert_eq!(ty("x"), ResultType::Undefined);
    }

    #[test]
    fn unification() {
        assert_eq!(ty("x + 1"), ResultType::Number);
        assert_eq!(ty("x + y"), ResultType::Number);
        assert_eq!(ty("x + \"a\""), ResultType::Str);
        assert_eq!(ty("x + 2 m"), ResultType::Quantity(Dimension::Length));
        assert_eq!(ty("x == 1"), ResultType::Boolean);
        assert_eq!(ty("x < y"), ResultType::Undefined);
        assert_eq!(ty("x & true"), ResultType::Boolean);
        assert_eq!(ty("-x"), ResultType::Number);
        assert_eq!(ty("-x * 2 m"), ResultType::Quantity(Dimension::Length));
        assert_eq!(ty("!x"), ResultType::Boolean);
        assert_eq!(ty("sin(x) + cos(2x)"), ResultType::Number);
        assert_eq!(ty("root(x, 3)"), ResultType::Number);
        assert_eq!(ty("dot(v, {1, 2})"), ResultType::Number);
        assert_eq!(ty("det(m)"), ResultType::Number);
    }

    #[test]
    fn type_errors() {
        let err = infer_str("true + 1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<TypeMismatch>(),
            Some(&TypeMismatch {
                op: BinOpKind::Add,
                left: ResultType::Boolean,
                right: ResultType::Number,
            }),
        );

        assert!(infer_str("i + 30 deg").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("i < 2").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("x < true").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("-\"a\"").unwrap_err().is::<UnaryTypeMismatch>());
        assert!(infer_str("det({1, 2})").unwrap_err().is::<ArgumentTypeMismatch>());
        assert!(infer_str("{1, true}").unwrap_err().is::<ExpectedType>());
        assert!(infer_str("convert(3, \"ft\")").unwrap_err().is::<ExpectedType>());
    }

    #[test]
    fn conditionals() {
        assert_eq!(ty("if(x > 1, 2, 3)"), ResultType::Number);
        assert_eq!(ty("if(x > 1, 2, \"a\")"), ResultType::Undefined);
        assert_eq!(ty("if(x, 1, y)"), ResultType::Number);
        assert_eq!(ty("if(x, y, \"a\")"), ResultType::Str);
        assert_eq!(ty("if(x, y, z)"), ResultType::Undefined);
        assert_eq!(ty("if(true, 2, true + 1)"), ResultType::Number);
        assert_eq!(ty("if(p, 2, true + 1)"), ResultType::Undefined);
        assert!(infer_str("if(false, 2, true + 1)").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("if(p, true + 1, 2 - true)").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("if(1, 2, 3)").unwrap_err().is::<ExpectedType>());
    }

    #[test]
    fn series() {
        assert_eq!(ty("summation(k, 1, 10, k^2)"), ResultType::Number);
        assert_eq!(ty("product(k, 1, n, k)"), ResultType::Number);
        assert_eq!(ty("summation(k, 1, 3, k * 1 m)"), ResultType::Quantity(Dimension::Length));
        assert_eq!(ty("product(k, 1, 3, 1 m)"), ResultType::Undefined);
        assert_eq!(ty("summation(k, 5, 1, true + 1)"), ResultType::Number);
        assert!(infer_str("summation(k, 1, 2, true + 1)").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("summation(k, 1, 2, k == 1)").unwrap_err().is::<TypeMismatch>());
        assert!(infer_str("summation(k, true, 2, k)").unwrap_err().is::<ExpectedType>());
    }

    #[test]
    fn conversions() {
        assert_eq!(ty("convert(3 ft, \"m\")"), ResultType::Quantity(Dimension::Length));
        assert_eq!(ty("convert(x, \"min\")"), ResultType::Quantity(Dimension::Time));
    }

    #[test]
    fn definitions() {
        assert_eq!(ty("y = 2 * i"), ResultType::Complex);
        assert_eq!(ty("f(x) = x + true"), ResultType::Undefined);
        assert_eq!(ty("f(2) + 1"), ResultType::Number);
    }

    #[test]
    fn with_bindings() {
        let mut table = SymbolTable::default();
        table.insert("v", vec![1.0, 2.0], Access::Mutable);
        table.insert("s", "text", Access::Mutable);

        let mut analyzer = TypeAnalyzer::with_bindings(&table);
        assert_eq!(analyzer.infer(&parse("v * 2").unwrap()).unwrap(), ResultType::Vector);
        assert_eq!(analyzer.infer(&parse("s + \"!\"").unwrap()).unwrap(), ResultType::Str);
        assert!(analyzer.infer(&parse("s * 2").unwrap()).unwrap_err().is::<TypeMismatch>());
    }

    #[test]
    fn analyzer_trait() {
        let mut analyzer = TypeAnalyzer::new();
        let ty = crate::symbolic::analyze(&parse("3 + 4").unwrap(), &mut analyzer).unwrap();
        assert_eq!(ty, ResultType::Number);
    }

    /// Every well-typed closed expression executes to a value of the inferred type, and every
    /// rejected one fails to execute.
    #[test]
    fn sound_against_execution() {
        let sources = [
            "1 + 2 * 3",
            "2 * i + 1",
            "3 m * 2 m",
            "6 m / 2 m",
            "{1, 2} + {3, 4}",
            "{{1, 2}, {3, 4}} * {1, 1}",
            "\"a\" + \"b\"",
            "sqrt(2) < 3 & !false",
            "if(2 > 1, 10, 20)",
            "if(1 > 2, 10, -pi)",
            "summation(k, 1, 4, k!)",
            "convert(1 ft, \"m\")",
            "abs(-3 kg)",
            "true + 1",
            "i < 2",
            "{1, 2} * {3, 4}",
            "det({1, 2})",
            "\"a\" - \"b\"",
            "if(3, 1, 2)",
        ];
        for source in sources {
            let expr = parse(source).unwrap();
            let mut table = SymbolTable::default();
            match (infer(&expr), execute(&expr, &mut table)) {
                (Ok(ty), Ok(value)) => assert_eq!(
                    value.result_type(),
                    ty,
                    "`{}` executed to {}, which does not have the inferred type",
                    source,
                    value,
                ),
                (Err(_), Err(_)) => (),
                (Ok(ty), Err(err)) => panic!("`{}` typed as {} but failed: {:?}", source, ty, err),
                (Err(err), Ok(value)) => panic!("`{}` was rejected ({:?}) but ran to {}", source, err, value),
            }
        }
    }

    #[test]
    fn user_function_values_are_undefined() {
        let mut table = SymbolTable::default();
        execute(&parse("f(x) = x^2").unwrap(), &mut table).unwrap();
        assert!(matches!(table.get("f"), Some(Value::Lambda(_))));
        let mut analyzer = TypeAnalyzer::with_bindings(&table);
        assert_eq!(analyzer.infer(&parse("f").unwrap()).unwrap(), ResultType::Undefined);
        assert_eq!(analyzer.infer(&parse("f(1)").unwrap()).unwrap(), ResultType::Undefined);
    }
}
