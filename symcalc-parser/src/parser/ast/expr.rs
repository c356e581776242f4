use crate::parser::{
    ast::{func::Func, iter::ExprIter},
    token::op::{BinOpKind, UnaryOpKind},
};
use std::{convert::Infallible, hash::{Hash, Hasher}};
use symcalc_unit_convert::Unit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a general expression.
///
/// An expression is a strict tree: every node owns its children exclusively, and equality is
/// structural. Trees are never mutated once built; every pass over a tree builds a new one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A number literal, such as `2.5`.
    Number(f64),

    /// A boolean literal, `true` or `false`.
    Boolean(bool),

    /// A string literal, such as `"abc"`.
    Str(String),

    /// A dimensioned literal, such as `90 deg` or `3 ft`.
    Quantity(f64, Unit),

    /// A variable, such as `x`.
    Symbol(String),

    /// A vector literal, such as `{1, 2, 3}`.
    Vector(Vec<Expr>),

    /// A matrix literal, such as `{{1, 2}, {3, 4}}`. Every row has the same length.
    Matrix(Vec<Vec<Expr>>),

    /// A unary operation, such as `-x`, `!p`, or `n!`.
    Unary(UnaryOpKind, Box<Expr>),

    /// A binary operation, such as `a + b`.
    Binary(BinOpKind, Box<Expr>, Box<Expr>),

    /// A call to a builtin function, such as `sin(x)`.
    Func(Func, Vec<Expr>),

    /// A call to a user-defined function, such as `f(1, 2)`.
    Call(String, Vec<Expr>),

    /// A conditional, `if(condition, then, otherwise)`. Only the taken branch is evaluated.
    If(Box<Expr>, Box<Expr>, Box<Expr>),

    /// A unit conversion, `convert(value, unit)`.
    Convert(Box<Expr>, String),

    /// An assignment to a variable, such as `x = 5`.
    Assign(String, Box<Expr>),

    /// A function definition, such as `f(x, y) = x + y`.
    FuncDef(String, Vec<String>, Box<Expr>),

    /// `summation(n, from, to, body)`, the sum of `body` for each integer `n` in `[from, to]`.
    Summation(String, Box<Expr>, Box<Expr>, Box<Expr>),

    /// `product(n, from, to, body)`, the product of `body` for each integer `n` in `[from, to]`.
    Product(String, Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a unary expression.
    pub fn unary(op: UnaryOpKind, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    /// Creates a binary expression.
    pub fn binary(op: BinOpKind, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// Creates a call to a builtin function with one argument.
    pub fn call1(func: Func, arg: Expr) -> Self {
        Expr::Func(func, vec![arg])
    }

    /// Returns the value of a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the expression is a number literal equal to the given value.
    pub fn is_number(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    /// Returns true if the expression is a literal with no children.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expr::Number(_) | Expr::Boolean(_) | Expr::Str(_) | Expr::Quantity(..)
        )
    }

    /// Returns the name bound by this node for the duration of its children, if any.
    fn bound_names(&self) -> &[String] {
        match self {
            Expr::Summation(var, ..) | Expr::Product(var, ..) => std::slice::from_ref(var),
            Expr::FuncDef(_, params, _) => params,
            _ => &[],
        }
    }

    /// Returns the direct children of the expression, in left-to-right order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Number(_) | Expr::Boolean(_) | Expr::Str(_) | Expr::Quantity(..)
                | Expr::Symbol(_) => Vec::new(),
            Expr::Vector(elems) => elems.iter().collect(),
            Expr::Matrix(rows) => rows.iter().flatten().collect(),
            Expr::Unary(_, operand) => vec![operand],
            Expr::Binary(_, lhs, rhs) => vec![lhs, rhs],
            Expr::Func(_, args) | Expr::Call(_, args) => args.iter().collect(),
            Expr::If(cond, then, otherwise) => vec![cond, then, otherwise],
            Expr::Convert(value, _) => vec![value],
            Expr::Assign(_, value) => vec![value],
            Expr::FuncDef(_, _, body) => vec![body],
            Expr::Summation(_, from, to, body) | Expr::Product(_, from, to, body) => vec![from, to, body],
        }
    }

    /// Builds a copy of this node whose children are replaced by the result of calling `f` on
    /// each child, in the same order as [`Expr::children`]. Returns the first error `f` returns.
    pub fn try_map_children<E>(&self, mut f: impl FnMut(&Expr) -> Result<Expr, E>) -> Result<Expr, E> {
        let mut map = |expr: &Expr| f(expr).map(Box::new);
        Ok(match self {
            Expr::Number(_) | Expr::Boolean(_) | Expr::Str(_) | Expr::Quantity(..)
                | Expr::Symbol(_) => self.clone(),
            Expr::Vector(elems) => Expr::Vector(
                elems.iter().map(|e| map(e).map(|e| *e)).collect::<Result<_, _>>()?,
            ),
            Expr::Matrix(rows) => Expr::Matrix(
                rows.iter()
                    .map(|row| row.iter().map(|e| map(e).map(|e| *e)).collect::<Result<_, _>>())
                    .collect::<Result<_, _>>()?,
            ),
            Expr::Unary(op, operand) => Expr::Unary(*op, map(operand)?),
            Expr::Binary(op, lhs, rhs) => {
                let lhs = map(lhs)?;
                Expr::Binary(*op, lhs, map(rhs)?)
            },
            Expr::Func(func, args) => Expr::Func(
                *func,
                args.iter().map(|e| map(e).map(|e| *e)).collect::<Result<_, _>>()?,
            ),
            Expr::Call(name, args) => Expr::Call(
                name.clone(),
                args.iter().map(|e| map(e).map(|e| *e)).collect::<Result<_, _>>()?,
            ),
            Expr::If(cond, then, otherwise) => {
                let cond = map(cond)?;
                let then = map(then)?;
                Expr::If(cond, then, map(otherwise)?)
            },
            Expr::Convert(value, unit) => Expr::Convert(map(value)?, unit.clone()),
            Expr::Assign(name, value) => Expr::Assign(name.clone(), map(value)?),
            Expr::FuncDef(name, params, body) => Expr::FuncDef(name.clone(), params.clone(), map(body)?),
            Expr::Summation(var, from, to, body) => {
                let from = map(from)?;
                let to = map(to)?;
                Expr::Summation(var.clone(), from, to, map(body)?)
            },
            Expr::Product(var, from, to, body) => {
                let from = map(from)?;
                let to = map(to)?;
                Expr::Product(var.clone(), from, to, map(body)?)
            },
        })
    }

    /// Builds a copy of this node whose children are replaced by the result of calling `f` on
    /// each child.
    pub fn map_children(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self.try_map_children(|child| Ok::<_, Infallible>(f(child))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Builds a copy of this node with the given children substituted in, in the order of
    /// [`Expr::children`]. If fewer children are given than the node has, the remaining children
    /// are kept as they are.
    pub fn with_children(&self, children: impl IntoIterator<Item = Expr>) -> Expr {
        let mut children = children.into_iter();
        self.map_children(|child| children.next().unwrap_or_else(|| child.clone()))
    }

    /// Returns true if the given variable occurs free in the expression. Occurrences bound by an
    /// enclosing summation, product, or function definition do not count.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Symbol(sym) => sym == name,
            Expr::Summation(var, from, to, body) | Expr::Product(var, from, to, body) => {
                from.contains_symbol(name)
                    || to.contains_symbol(name)
                    || (var != name && body.contains_symbol(name))
            },
            _ if self.bound_names().iter().any(|bound| bound == name) => false,
            _ => self.children().into_iter().any(|child| child.contains_symbol(name)),
        }
    }

    /// Replaces every free occurrence of the given variable with the replacement expression.
    pub fn substitute(&self, name: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Symbol(sym) if sym == name => replacement.clone(),
            Expr::Summation(var, from, to, body) | Expr::Product(var, from, to, body) if var == name => {
                // the index shadows `name` inside the body only
                let from = from.substitute(name, replacement);
                let to = to.substitute(name, replacement);
                self.with_children([from, to, (**body).clone()])
            },
            _ if self.bound_names().iter().any(|bound| bound == name) => self.clone(),
            _ => self.map_children(|child| child.substitute(name, replacement)),
        }
    }

    /// Returns the number of nodes in the expression.
    pub fn size(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            // `0.0` and `-0.0` compare equal, so they must hash equally
            Expr::Number(n) => (if *n == 0.0 { 0.0f64 } else { *n }).to_bits().hash(state),
            Expr::Boolean(b) => b.hash(state),
            Expr::Str(s) | Expr::Symbol(s) => s.hash(state),
            Expr::Quantity(n, unit) => {
                (if *n == 0.0 { 0.0f64 } else { *n }).to_bits().hash(state);
                unit.hash(state);
            },
            Expr::Unary(op, _) => op.hash(state),
            Expr::Binary(op, ..) => op.hash(state),
            Expr::Func(func, _) => func.hash(state),
            Expr::Call(name, _) | Expr::Assign(name, _) => name.hash(state),
            Expr::Convert(_, unit) => unit.hash(state),
            Expr::FuncDef(name, params, _) => {
                name.hash(state);
                params.hash(state);
            },
            Expr::Summation(var, ..) | Expr::Product(var, ..) => var.hash(state),
            Expr::Matrix(rows) => rows.len().hash(state),
            Expr::Vector(_) | Expr::If(..) => {},
        }
        for child in self.children() {
            child.hash(state);
        }
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Number(n)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    #[test]
    fn children_in_order() {
        let expr = Expr::binary(BinOpKind::Sub, x(), Expr::Number(2.0));
        assert_eq!(expr.children(), vec![&x(), &Expr::Number(2.0)]);
    }

    #[test]
    fn with_children_substitutes() {
        let expr = Expr::binary(BinOpKind::Add, x(), Expr::Number(1.0));
        let replaced = expr.with_children([Expr::Number(3.0), Expr::Number(4.0)]);
        assert_eq!(replaced, Expr::binary(BinOpKind::Add, Expr::Number(3.0), Expr::Number(4.0)));

        // the original is untouched
        assert_eq!(expr, Expr::binary(BinOpKind::Add, x(), Expr::Number(1.0)));
    }

    #[test]
    fn bound_variables_are_not_free() {
        let sum = Expr::Summation(
            "x".to_string(),
            Box::new(Expr::Number(1.0)),
            Box::new(Expr::symbol("n")),
            Box::new(Expr::binary(BinOpKind::Exp, x(), Expr::Number(2.0))),
        );
        assert!(!sum.contains_symbol("x"));
        assert!(sum.contains_symbol("n"));

        let substituted = sum.substitute("x", &Expr::Number(5.0));
        assert_eq!(substituted, sum);
    }

    #[test]
    fn substitute_free_occurrences() {
        let expr = Expr::call1(Func::Sin, Expr::binary(BinOpKind::Mul, Expr::Number(2.0), x()));
        let substituted = expr.substitute("x", &Expr::symbol("t"));
        assert_eq!(
            substituted,
            Expr::call1(Func::Sin, Expr::binary(BinOpKind::Mul, Expr::Number(2.0), Expr::symbol("t"))),
        );
    }

    #[test]
    fn structural_hash() {
        let a = Expr::binary(BinOpKind::Add, x(), Expr::Number(0.0));
        let b = Expr::binary(BinOpKind::Add, x(), Expr::Number(-0.0));
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
