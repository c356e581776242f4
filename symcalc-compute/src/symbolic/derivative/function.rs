//! Derivatives of the built-in functions, applied with the chain rule.

use symcalc_parser::parser::{
    ast::{Expr, Func},
    token::op::{BinOpKind, UnaryOpKind},
};
use crate::error::Error;
use super::{MultBuilder, Pass, SumBuilder};

fn num(n: f64) -> Expr {
    Expr::Number(n)
}

fn neg(e: Expr) -> Expr {
    Expr::unary(UnaryOpKind::Neg, e)
}

fn mul(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOpKind::Mul, lhs, rhs)
}

fn div(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOpKind::Div, lhs, rhs)
}

fn add(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOpKind::Add, lhs, rhs)
}

fn sub(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinOpKind::Sub, lhs, rhs)
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    Expr::binary(BinOpKind::Exp, base, exponent)
}

fn squared(e: Expr) -> Expr {
    pow(e, num(2.0))
}

fn call(func: Func, arg: Expr) -> Expr {
    Expr::call1(func, arg)
}

/// `|u| * sqrt(u^2 - 1)`, which appears in the derivatives of `asec` and `acsc`.
fn abs_sqrt_sq_minus_one(u: &Expr) -> Expr {
    mul(call(Func::Abs, u.clone()), call(Func::Sqrt, sub(squared(u.clone()), num(1.0))))
}

/// Returns the derivative of `func` at `u`, that is, the outer factor of the chain rule. Returns
/// [`None`] if the function has no derivative.
fn outer_derivative(func: Func, u: &Expr) -> Option<Expr> {
    let u = u.clone();
    Some(match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => squared(call(Func::Sec, u)),
        Func::Csc => neg(mul(call(Func::Csc, u.clone()), call(Func::Cot, u))),
        Func::Sec => mul(call(Func::Sec, u.clone()), call(Func::Tan, u)),
        Func::Cot => neg(squared(call(Func::Csc, u))),

        Func::Asin => div(num(1.0), call(Func::Sqrt, sub(num(1.0), squared(u)))),
        Func::Acos => neg(div(num(1.0), call(Func::Sqrt, sub(num(1.0), squared(u))))),
        Func::Atan => div(num(1.0), add(num(1.0), squared(u))),
        Func::Acsc => neg(div(num(1.0), abs_sqrt_sq_minus_one(&u))),
        Func::Asec => div(num(1.0), abs_sqrt_sq_minus_one(&u)),
        Func::Acot => neg(div(num(1.0), add(num(1.0), squared(u)))),

        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => squared(call(Func::Sech, u)),
        Func::Csch => neg(mul(call(Func::Csch, u.clone()), call(Func::Coth, u))),
        Func::Sech => neg(mul(call(Func::Sech, u.clone()), call(Func::Tanh, u))),
        Func::Coth => neg(squared(call(Func::Csch, u))),

        Func::Asinh => div(num(1.0), call(Func::Sqrt, add(squared(u), num(1.0)))),
        Func::Acosh => div(num(1.0), call(Func::Sqrt, sub(squared(u), num(1.0)))),
        Func::Atanh | Func::Acoth => div(num(1.0), sub(num(1.0), squared(u))),
        Func::Acsch => neg(div(
            num(1.0),
            mul(call(Func::Abs, u.clone()), call(Func::Sqrt, add(num(1.0), squared(u)))),
        )),
        Func::Asech => neg(div(
            num(1.0),
            mul(u.clone(), call(Func::Sqrt, sub(num(1.0), squared(u)))),
        )),

        Func::Exp => call(Func::Exp, u),
        Func::Ln => div(num(1.0), u),
        Func::Sqrt => div(num(1.0), mul(num(2.0), call(Func::Sqrt, u))),
        Func::Cbrt => div(num(1.0), mul(num(3.0), squared(call(Func::Cbrt, u)))),
        Func::Abs => call(Func::Sign, u),
        _ => return None,
    })
}

impl Pass<'_> {
    /// Computes the derivative of a call to a built-in function.
    pub(super) fn function_derivative(&mut self, expr: &Expr, func: Func, args: &[Expr]) -> Result<Expr, Error> {
        match (func, args) {
            // `log(u)` is `ln(u) / ln(10)`, and `log(u, b)` is `ln(u) / ln(b)`
            (Func::Log, [u]) => self.chain(div(num(1.0), mul(u.clone(), call(Func::Ln, num(10.0)))), u),
            (Func::Log, [u, base]) => {
                if self.depends(base) {
                    let quotient = div(call(Func::Ln, u.clone()), call(Func::Ln, base.clone()));
                    self.derive(&quotient)
                } else {
                    self.chain(div(num(1.0), mul(u.clone(), call(Func::Ln, base.clone()))), u)
                }
            },

            // `root(u, n)` is `u^(1/n)`
            (Func::Root, [u, n]) => {
                if self.depends(n) {
                    return Err(self.no_derivative(expr));
                }
                let reduced = match n.as_number() {
                    Some(n) => num(n - 1.0),
                    None => sub(n.clone(), num(1.0)),
                };
                let root = Expr::Func(Func::Root, vec![u.clone(), n.clone()]);
                self.chain(div(num(1.0), mul(n.clone(), pow(root, reduced))), u)
            },

            // `sum(a, b, ...)' = a' + b' + ...`
            (Func::Sum, args) if !matches!(args, [Expr::Vector(_)]) => {
                let mut sum = SumBuilder::default();
                for arg in args {
                    sum.add(self.derive(arg)?);
                }
                Ok(sum.into())
            },

            (func, [u]) => match outer_derivative(func, u) {
                Some(outer) => self.chain(outer, u),
                None => Err(self.no_derivative(expr)),
            },
            _ => Err(self.no_derivative(expr)),
        }
    }

    /// `f(u)' = f'(u) * u'`
    fn chain(&mut self, outer: Expr, u: &Expr) -> Result<Expr, Error> {
        let mut product = MultBuilder::default();
        product.mult(outer);
        product.mult(self.derive(u)?);
        Ok(product.into())
    }
}
