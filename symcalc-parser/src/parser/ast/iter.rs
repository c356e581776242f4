use super::expr::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Nodes waiting to be visited, with whether their children have already been pushed.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            let children = expr.children();
            if children.is_empty() {
                return Some(expr);
            }

            self.stack.push((expr, true));
            self.stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::token::op::BinOpKind;
    use super::*;

    #[test]
    fn post_order() {
        // (1 + x) * 3
        let expr = Expr::binary(
            BinOpKind::Mul,
            Expr::binary(BinOpKind::Add, Expr::Number(1.0), Expr::symbol("x")),
            Expr::Number(3.0),
        );
        let visited = expr.post_order_iter().map(|e| e.to_string()).collect::<Vec<_>>();
        assert_eq!(visited, vec!["1", "x", "1 + x", "3", "(1 + x) * 3"]);
    }
}
