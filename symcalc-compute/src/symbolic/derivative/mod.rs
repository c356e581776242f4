//! Symbolic differentiation.
//!
//! [`Differentiator::differentiate`] builds the derivative of an expression with the usual rules
//! of single-variable calculus, then simplifies it. Any subtree that does not mention the variable
//! differentiates to `0` without being visited, which keeps the raw derivative small when large
//! parts of the expression are constant.
//!
//! Trigonometric functions are differentiated as if their arguments were in radians.

mod function;

use std::collections::HashMap;
use symcalc_parser::parser::{
    ast::{Expr, Func},
    token::op::{BinOpKind, UnaryOpKind},
};
use tracing::debug;
use crate::{
    ctxt::Bindings,
    error::{error, kind::{NoDerivative, UnknownFunction, WrongArgumentCount}, Error},
    value::{Lambda, Value},
};
use super::{simplify::Simplifier, Analyzer};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to clean up trees and
/// is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Number(n) => *n == 0.0,
        Expr::Unary(UnaryOpKind::Neg, operand) => is_trivially_zero(operand),
        Expr::Binary(BinOpKind::Mul, lhs, rhs) => is_trivially_zero(lhs) || is_trivially_zero(rhs),
        Expr::Binary(BinOpKind::Add | BinOpKind::Sub, lhs, rhs) => {
            is_trivially_zero(lhs) && is_trivially_zero(rhs)
        },
        Expr::Binary(BinOpKind::Div, lhs, _) => is_trivially_zero(lhs),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one. This is intended to clean up trees and
/// is not mathematically rigorous.
fn is_trivially_one(e: &Expr) -> bool {
    match e {
        Expr::Number(n) => *n == 1.0,
        Expr::Binary(BinOpKind::Mul, lhs, rhs) => is_trivially_one(lhs) && is_trivially_one(rhs),
        Expr::Binary(BinOpKind::Exp, base, exponent) => {
            is_trivially_zero(exponent) || is_trivially_one(base)
        },
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        value.0
            .into_iter()
            .reduce(|product, factor| Expr::binary(BinOpKind::Mul, product, factor))
            .unwrap_or(Expr::Number(1.0))
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expr::Number(0.0)];
            return;
        }

        if !is_trivially_one(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a sum of expressions while applying basic simplification rules. Only
/// non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<(bool, Expr)>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        let mut terms = value.0.into_iter();
        let Some((negated, first)) = terms.next() else {
            return Expr::Number(0.0);
        };
        let first = if negated { Expr::unary(UnaryOpKind::Neg, first) } else { first };
        terms.fold(first, |sum, (negated, term)| {
            let op = if negated { BinOpKind::Sub } else { BinOpKind::Add };
            Expr::binary(op, sum, term)
        })
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push((false, e))
        }
    }

    fn sub(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push((true, e))
        }
    }
}

/// Differentiates expressions with respect to a variable.
///
/// Calls to user-defined functions are differentiated by substituting the arguments into the
/// body of the function, so the functions must be registered first, either one at a time with
/// [`Differentiator::with_function`], or all at once from a symbol table with
/// [`Differentiator::from_bindings`].
#[derive(Debug, Clone)]
pub struct Differentiator {
    /// The variable of differentiation.
    var: String,

    /// The user-defined functions that may be called, by name.
    functions: HashMap<String, Lambda>,

    /// Simplifies each derivative before it is returned.
    simplifier: Simplifier,
}

impl Differentiator {
    /// Creates a differentiator with respect to the given variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            functions: HashMap::new(),
            simplifier: Simplifier::default(),
        }
    }

    /// Creates a differentiator with respect to the given variable that knows every user-defined
    /// function bound in `bindings`.
    pub fn from_bindings(var: impl Into<String>, bindings: &dyn Bindings) -> Self {
        let mut differentiator = Self::new(var);
        for name in bindings.names() {
            if let Some(Value::Lambda(lambda)) = bindings.get(&name) {
                differentiator.functions.insert(name, lambda.clone());
            }
        }
        differentiator
    }

    /// Registers a user-defined function.
    pub fn with_function(mut self, name: impl Into<String>, params: Vec<String>, body: Expr) -> Self {
        self.functions.insert(name.into(), Lambda { params, body });
        self
    }

    /// Sets the simplifier that is run on each derivative.
    pub fn with_simplifier(mut self, simplifier: Simplifier) -> Self {
        self.simplifier = simplifier;
        self
    }

    /// Returns the variable of differentiation.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Computes the derivative of the expression without simplifying it.
    pub fn derivative(&self, expr: &Expr) -> Result<Expr, Error> {
        Pass { differentiator: self, inlining: Vec::new() }.derive(expr)
    }

    /// Computes the simplified derivative of the expression.
    pub fn differentiate(&self, expr: &Expr) -> Result<Expr, Error> {
        let raw = self.derivative(expr)?;
        let derivative = self.simplifier.simplify(&raw);
        debug!(%expr, var = self.var.as_str(), %derivative, "differentiated");
        Ok(derivative)
    }

    /// Computes the `n`-th derivative of the expression, simplifying after each step.
    pub fn differentiate_n(&self, expr: &Expr, n: usize) -> Result<Expr, Error> {
        (0..n).try_fold(expr.clone(), |expr, _| self.differentiate(&expr))
    }
}

impl Analyzer for Differentiator {
    type Output = Expr;

    fn analyze(&mut self, expr: &Expr) -> Result<Expr, Error> {
        self.differentiate(expr)
    }
}

/// Differentiates the expression with respect to `var`.
pub fn differentiate(expr: &Expr, var: &str) -> Result<Expr, Error> {
    Differentiator::new(var).differentiate(expr)
}

/// Computes the `n`-th derivative of the expression with respect to `var`.
pub fn differentiate_n(expr: &Expr, var: &str, n: usize) -> Result<Expr, Error> {
    Differentiator::new(var).differentiate_n(expr, n)
}

/// Substitutes the arguments of a call into the body of the called function.
///
/// The parameters are first renamed to names the lexer cannot produce, so that an argument
/// mentioning another parameter's name is not substituted twice.
fn inline(lambda: &Lambda, args: &[Expr]) -> Expr {
    let placeholders = (0..lambda.params.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>();
    let body = lambda.params
        .iter()
        .zip(&placeholders)
        .fold(lambda.body.clone(), |body, (param, placeholder)| {
            body.substitute(param, &Expr::symbol(placeholder.as_str()))
        });
    placeholders
        .iter()
        .zip(args)
        .fold(body, |body, (placeholder, arg)| body.substitute(placeholder, arg))
}

/// A single differentiation of one expression.
struct Pass<'d> {
    differentiator: &'d Differentiator,

    /// The user-defined functions whose bodies are being differentiated, innermost last.
    inlining: Vec<String>,
}

impl Pass<'_> {
    fn var(&self) -> &str {
        &self.differentiator.var
    }

    /// The error for an expression that has no derivative.
    fn no_derivative(&self, expr: &Expr) -> Error {
        error(NoDerivative { expr: expr.to_string(), var: self.var().to_owned() })
    }

    /// Returns true if the expression may change with the variable. Calls to user-defined
    /// functions always may, since their bodies can read the variable.
    fn depends(&self, expr: &Expr) -> bool {
        expr.contains_symbol(self.var())
            || expr.post_order_iter().any(|e| matches!(e, Expr::Call(..)))
    }

    /// Computes the derivative of the given expression.
    fn derive(&mut self, expr: &Expr) -> Result<Expr, Error> {
        if !self.depends(expr) {
            return Ok(Expr::Number(0.0));
        }

        match expr {
            Expr::Symbol(_) => Ok(Expr::Number(1.0)),
            Expr::Vector(elems) => Ok(Expr::Vector(
                elems.iter().map(|elem| self.derive(elem)).collect::<Result<_, _>>()?,
            )),
            Expr::Matrix(rows) => Ok(Expr::Matrix(
                rows.iter()
                    .map(|row| row.iter().map(|elem| self.derive(elem)).collect::<Result<_, _>>())
                    .collect::<Result<_, _>>()?,
            )),
            Expr::Unary(UnaryOpKind::Neg, operand) => {
                let derivative = self.derive(operand)?;
                if is_trivially_zero(&derivative) {
                    Ok(Expr::Number(0.0))
                } else {
                    Ok(Expr::unary(UnaryOpKind::Neg, derivative))
                }
            },
            Expr::Binary(op, lhs, rhs) => self.binary(expr, *op, lhs, rhs),
            Expr::Func(func, args) => self.function_derivative(expr, *func, args),
            Expr::Call(name, args) => self.call(name, args),
            Expr::If(condition, then, otherwise) => Ok(Expr::If(
                condition.clone(),
                Box::new(self.derive(then)?),
                Box::new(self.derive(otherwise)?),
            )),
            Expr::Summation(index, from, to, body) => {
                if self.depends(from) || self.depends(to) {
                    return Err(self.no_derivative(expr));
                }
                if index == self.var() {
                    // the index shadows the variable everywhere in the body
                    return Ok(Expr::Number(0.0));
                }
                Ok(Expr::Summation(
                    index.clone(),
                    from.clone(),
                    to.clone(),
                    Box::new(self.derive(body)?),
                ))
            },
            _ => Err(self.no_derivative(expr)),
        }
    }

    /// Computes the derivative of a binary operation.
    fn binary(&mut self, expr: &Expr, op: BinOpKind, lhs: &Expr, rhs: &Expr) -> Result<Expr, Error> {
        match op {
            // `(f + g)' = f' + g'`
            BinOpKind::Add | BinOpKind::Sub => {
                let mut sum = SumBuilder::default();
                sum.add(self.derive(lhs)?);
                if op == BinOpKind::Add {
                    sum.add(self.derive(rhs)?);
                } else {
                    sum.sub(self.derive(rhs)?);
                }
                Ok(sum.into())
            },
            // `(f * g)' = f' * g + f * g'`
            BinOpKind::Mul => {
                let mut sum = SumBuilder::default();

                let mut left = MultBuilder::default();
                left.mult(self.derive(lhs)?);
                left.mult(rhs.clone());
                sum.add(left.into());

                let mut right = MultBuilder::default();
                right.mult(lhs.clone());
                right.mult(self.derive(rhs)?);
                sum.add(right.into());

                Ok(sum.into())
            },
            BinOpKind::Div => self.quotient_rule(lhs, rhs),
            BinOpKind::Exp => self.power_rule(lhs, rhs),
            _ => Err(self.no_derivative(expr)),
        }
    }

    /// `(f / g)' = (f' * g - f * g') / g^2`
    ///
    /// When `g` is constant, this is simply `f' / g`.
    fn quotient_rule(&mut self, lhs: &Expr, rhs: &Expr) -> Result<Expr, Error> {
        let numerator = self.derive(lhs)?;
        if !self.depends(rhs) {
            return Ok(if is_trivially_zero(&numerator) {
                Expr::Number(0.0)
            } else {
                Expr::binary(BinOpKind::Div, numerator, rhs.clone())
            });
        }

        let mut left = MultBuilder::default();
        left.mult(numerator);
        left.mult(rhs.clone());

        let mut right = MultBuilder::default();
        right.mult(lhs.clone());
        right.mult(self.derive(rhs)?);

        let mut difference = SumBuilder::default();
        difference.add(left.into());
        difference.sub(right.into());
        Ok(Expr::binary(
            BinOpKind::Div,
            difference.into(),
            Expr::binary(BinOpKind::Exp, rhs.clone(), Expr::Number(2.0)),
        ))
    }

    /// Applies the power rule. There are three cases:
    ///
    /// - `(f^n)' = n * f^(n-1) * f'` when the exponent is constant
    /// - `(a^g)' = a^g * ln(a) * g'` when the base is constant, or `0` when the base is zero
    /// - `(f^g)' = f^g * (g' * ln(f) + g * f' / f)` otherwise
    fn power_rule(&mut self, base: &Expr, exponent: &Expr) -> Result<Expr, Error> {
        let power = Expr::binary(BinOpKind::Exp, base.clone(), exponent.clone());
        let mut product = MultBuilder::default();

        if !self.depends(exponent) {
            let reduced = match exponent.as_number() {
                Some(n) => Expr::Number(n - 1.0),
                None => Expr::binary(BinOpKind::Sub, exponent.clone(), Expr::Number(1.0)),
            };
            product.mult(exponent.clone());
            product.mult(Expr::binary(BinOpKind::Exp, base.clone(), reduced));
            product.mult(self.derive(base)?);
        } else if !self.depends(base) {
            // ln(0) is undefined, but 0^g is constant wherever it is defined
            if is_trivially_zero(&self.differentiator.simplifier.simplify(base)) {
                return Ok(Expr::Number(0.0));
            }
            product.mult(power);
            if !matches!(base, Expr::Symbol(name) if name == "e") {
                product.mult(Expr::call1(Func::Ln, base.clone()));
            }
            product.mult(self.derive(exponent)?);
        } else {
            let mut log_term = MultBuilder::default();
            log_term.mult(self.derive(exponent)?);
            log_term.mult(Expr::call1(Func::Ln, base.clone()));

            let mut ratio_term = MultBuilder::default();
            ratio_term.mult(exponent.clone());
            ratio_term.mult(Expr::binary(BinOpKind::Div, self.derive(base)?, base.clone()));

            let mut sum = SumBuilder::default();
            sum.add(log_term.into());
            sum.add(ratio_term.into());

            product.mult(power);
            product.mult(sum.into());
        }

        Ok(product.into())
    }

    /// Differentiates a call to a user-defined function by differentiating its body, with the
    /// arguments substituted in.
    fn call(&mut self, name: &str, args: &[Expr]) -> Result<Expr, Error> {
        let Some(lambda) = self.differentiator.functions.get(name) else {
            return Err(error(UnknownFunction { name: name.to_owned() }));
        };
        if lambda.params.len() != args.len() {
            return Err(error(WrongArgumentCount {
                name: name.to_owned(),
                expected: lambda.params.len(),
                given: args.len(),
            }));
        }

        let call = Expr::Call(name.to_owned(), args.to_vec());
        if self.inlining.iter().any(|inlined| inlined == name) {
            // a recursive function has no closed-form body to differentiate
            return Err(self.no_derivative(&call));
        }

        let body = inline(lambda, args);
        self.inlining.push(name.to_owned());
        let derivative = self.derive(&body);
        self.inlining.pop();
        derivative
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use symcalc_parser::parse;
    use crate::{
        ctxt::{Access, SymbolTable},
        eval::execute,
        error::kind::{NoDerivative, UnknownFunction},
    };
    use super::*;

    /// Evaluates the expression with `x` bound to the given value, on top of a table that already
    /// holds any functions the expression calls.
    fn eval_x(table: &SymbolTable, e: &Expr, x: f64) -> f64 {
        let mut table = table.clone();
        table.insert("x", x, Access::Mutable);
        match execute(e, &mut table).unwrap() {
            Value::Number(n) => n,
            other => panic!("expected a number, found {}", other),
        }
    }

    /// Performs a central finite difference to approximate the derivative of the expression.
    fn finite_difference(table: &SymbolTable, e: &Expr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(table, e, x + DX) - eval_x(table, e, x - DX)) / (2.0 * DX)
    }

    /// Defines each of the given functions, then checks the symbolic derivative of `function`
    /// against a numerical approximation at each point.
    fn test_with_definitions(
        definitions: &[&str],
        function: &str,
        points: impl IntoIterator<Item = f64>,
    ) {
        const TOL: f64 = 1e-4;

        let mut table = SymbolTable::default();
        for definition in definitions {
            execute(&parse(definition).unwrap(), &mut table).unwrap();
        }

        let expr = parse(function).unwrap();
        let symbolic = Differentiator::from_bindings("x", &table)
            .differentiate(&expr)
            .unwrap_or_else(|err| panic!("derivative of `{}` failed: {:?}", function, err));

        for point in points {
            let symbolically_computed = eval_x(&table, &symbolic, point);
            let numerically_computed = finite_difference(&table, &expr, point);
            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "for `{function}` at x={point}, the symbolic derivative `{symbolic}` was \
                 {symbolically_computed}, but the numerical derivative was \
                 {numerically_computed}",
            );
        }
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        test_with_definitions(&[], function, points);
    }

    fn derivative_of(source: &str) -> Result<Expr, Error> {
        differentiate(&parse(source).unwrap(), "x")
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0.0, 1.0, 2.0, 5.0, 8.0]);
        test_for_function("3x^5 - x^-2", [0.5, 1.0, 2.0]);
        test_for_function("sqrt(x^2 + 1)", [-2.0, 0.0, 3.0]);
        test_for_function("cbrt(x) + root(x, 4)", [0.5, 2.0, 9.0]);
    }

    #[test]
    fn product_and_quotient_rules() {
        test_for_function("sin(x) * x^2", [1.0]);
        test_for_function("ln(x) / x", [0.5, 1.0, 4.0]);
        test_for_function("1 / (1 + x^2)", [-1.0, 0.0, 2.0]);
        test_for_function("(x + 1) * (x - 2) * x", [-1.0, 0.5, 3.0]);
    }

    #[test]
    fn exponentials() {
        test_for_function("e^x", [-1.0, 0.0, 2.0]);
        test_for_function("2^x", [-1.0, 0.0, 2.0]);
        test_for_function("x^x", [0.5, 1.0, 2.0]);
        test_for_function("exp(2x) * log(x) + log(x, 2)", [0.5, 3.0]);
    }

    #[test]
    fn transcendental_functions() {
        test_for_function("cos(3x)^2 + tan(x) - sec(x)", [0.1, 0.7]);
        test_for_function("csc(x) + cot(x)", [0.4, 1.2]);
        test_for_function("atan(x) + asin(x / 2) - acos(x / 3)", [-0.5, 0.0, 0.9]);
        test_for_function("acot(x) + asec(x) + acsc(x)", [1.5, 3.0]);
        test_for_function("tanh(x) + sinh(x) * cosh(x)", [-1.0, 0.3]);
        test_for_function("csch(x) + sech(x) + coth(x)", [0.5, 2.0]);
        test_for_function("asinh(x) + atanh(x / 2)", [-0.5, 0.5]);
        test_for_function("acosh(x) + acoth(x) + asech(1 / x) + acsch(x)", [1.5, 3.0]);
        test_for_function("abs(x^3 - 2)", [0.0, 2.0]);
    }

    #[test]
    fn conditionals_and_series() {
        test_for_function("if(x > 1, x^2, 3x)", [0.5, 2.0]);
        test_for_function("summation(k, 1, 4, k * x^k)", [0.5, 1.5]);
        test_for_function("sum(x, x^2, 4)", [1.0, 2.0]);
    }

    #[test]
    fn user_functions() {
        test_with_definitions(&["f(t) = t^3 + t"], "f(2x)", [0.0, 1.0, -1.5]);
        test_with_definitions(&["g(a, b) = a * b^2", "h(t) = sin(g(t, x))"], "h(x)", [0.3, 1.0]);

        // parameters are substituted all at once
        test_with_definitions(&["p(a, b) = a - b"], "p(x^2, x)", [1.0, 4.0]);
    }

    #[test]
    fn exact_derivatives() {
        assert_eq!(derivative_of("x^2").unwrap().to_string(), "2 * x");
        assert_eq!(derivative_of("5 + y^2").unwrap(), Expr::Number(0.0));
        assert_eq!(derivative_of("y * x").unwrap(), Expr::symbol("y"));
        assert_eq!(derivative_of("sin(x)").unwrap(), Expr::call1(Func::Cos, Expr::symbol("x")));
        assert_eq!(derivative_of("x - 3x").unwrap(), Expr::Number(-2.0));
        assert_eq!(derivative_of("0^x").unwrap(), Expr::Number(0.0));
        assert_eq!(derivative_of("(3 - 3)^(x^2)").unwrap(), Expr::Number(0.0));
    }

    #[test]
    fn higher_order() {
        let expr = parse("x^3").unwrap();
        assert_eq!(differentiate_n(&expr, "x", 2).unwrap().to_string(), "6 * x");
        assert_eq!(differentiate_n(&expr, "x", 4).unwrap(), Expr::Number(0.0));
        assert_eq!(differentiate_n(&expr, "x", 0).unwrap(), expr);
    }

    #[test]
    fn constant_subtrees_are_not_visited() {
        // `y!` has no derivative, but it does not depend on `x`
        assert_eq!(derivative_of("y! + x").unwrap(), Expr::Number(1.0));
    }

    #[test]
    fn no_derivative() {
        let err = derivative_of("x!").unwrap_err();
        assert!(err.is::<NoDerivative>());

        assert!(derivative_of("floor(x)").unwrap_err().is::<NoDerivative>());
        assert!(derivative_of("x > 2").unwrap_err().is::<NoDerivative>());
        assert!(derivative_of("product(k, 1, 3, x + k)").unwrap_err().is::<NoDerivative>());
        assert!(derivative_of("summation(k, 1, x, k)").unwrap_err().is::<NoDerivative>());
    }

    #[test]
    fn unknown_functions() {
        let err = derivative_of("g(x)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnknownFunction>(),
            Some(&UnknownFunction { name: "g".to_string() }),
        );

        // even when the arguments are constant, the body might read `x`
        assert!(derivative_of("g(2)").unwrap_err().is::<UnknownFunction>());
    }

    #[test]
    fn recursive_functions() {
        let mut table = SymbolTable::default();
        execute(&parse("fact(n) = if(n <= 1, 1, n * fact(n - 1))").unwrap(), &mut table).unwrap();
        let err = Differentiator::from_bindings("x", &table)
            .differentiate(&parse("fact(x)").unwrap())
            .unwrap_err();
        assert!(err.is::<NoDerivative>());
    }
}
