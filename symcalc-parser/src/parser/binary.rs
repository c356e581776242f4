//! Precedence climbing over binary operators, including implicit multiplication.

use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    token::op::{BinOp, BinOpKind},
    unary,
    Associativity,
    Parser,
    Precedence,
};

/// A binary operator, or the implicit multiplication between two adjacent operands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BinOpExt {
    /// A binary operator, such as `+` or `*`.
    Op(BinOpKind),

    /// Implicit multiplication, such as `2x` or `3(x + 1)`.
    ///
    /// This is not a real operator, but it is treated as one for the purposes of parsing.
    ImplicitMultiplication,
}

impl BinOpExt {
    /// Returns the precedence of the binary operator.
    fn precedence(&self) -> Precedence {
        match self {
            BinOpExt::Op(op) => op.precedence(),
            BinOpExt::ImplicitMultiplication => Precedence::Factor,
        }
    }

    /// Returns the operation the resulting node performs.
    fn kind(&self) -> BinOpKind {
        match self {
            BinOpExt::Op(op) => *op,
            BinOpExt::ImplicitMultiplication => BinOpKind::Mul,
        }
    }
}

/// After parsing the left-hand-side, the operator, and the right-hand-side of a potential binary
/// expression, parse ahead to see if the right-hand-side is incomplete.
///
/// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`, then
/// the operator `+`, then the right-hand-side `2`. Before we build the `1 + 2` node, we check if
/// the operator after `2` binds tighter than `+`. It does, so the expression starting with `2` is
/// parsed first, and `2 * 3` becomes the right-hand-side.
///
/// When no operator follows the right-hand-side, another operand may still follow it, as in
/// `1 + 2x`. Implicit multiplication binds tighter than `+`, so `2x` becomes the right-hand-side.
/// [`parse_expr`] reports whether it consumed anything; if it did not, there is nothing left to
/// multiply and the loop ends instead of spinning forever.
fn complete_rhs(
    input: &mut Parser,
    lhs: Expr,
    op: BinOpExt,
    mut rhs: Expr,
) -> Result<Expr, Error> {
    let precedence = op.precedence();

    loop {
        if let Ok(next_op) = input.peek::<BinOp>() {
            let next_precedence = next_op.precedence();
            if next_precedence > precedence
                || next_precedence == precedence && next_op.associativity() == Associativity::Right
            {
                rhs = parse_expr(input, rhs, next_precedence)?.0;
            } else {
                // `1 * 2 + 3` or `1 * 2 * 3`: let `lhs op rhs` become the left-hand-side of the
                // next operator
                break;
            }
        } else {
            // implicit multiplication cannot take priority over an operator that binds at least
            // as tightly as it does
            if precedence >= Precedence::Factor {
                break;
            }

            let (expr, changed) = parse_expr(input, rhs, Precedence::Factor)?;
            rhs = expr;
            if !changed {
                break;
            }
        }
    }

    Ok(Expr::binary(op.kind(), lhs, rhs))
}

/// Parses a binary expression with the given left-hand-side, consuming every operator whose
/// precedence is at least `precedence`.
///
/// Returns the parsed expression, and whether any tokens were consumed to build it.
pub fn parse_expr(
    input: &mut Parser,
    mut lhs: Expr,
    precedence: Precedence,
) -> Result<(Expr, bool), Error> {
    let mut changed = false;

    loop {
        let op = input.try_parse_then::<BinOp, _>(|op, input| {
            if op.precedence() >= precedence {
                Ok(())
            } else {
                Err(input.error(kind::NonFatal))
            }
        });

        if let Ok(op) = op {
            let rhs = unary::parse_or_lower(input)?;
            lhs = complete_rhs(input, lhs, BinOpExt::Op(op.kind), rhs)?;
        } else if Precedence::Factor >= precedence {
            // only consider implicit multiplication if there is no operator at all, not because
            // the operator has lower precedence
            if input.peek::<BinOp>().is_ok() {
                break;
            }

            match input.try_parse_with_fn(unary::parse_postfix_or_primary) {
                Ok(rhs) => {
                    lhs = complete_rhs(input, lhs, BinOpExt::ImplicitMultiplication, rhs)?;
                },
                Err(err) if err.fatal => return Err(err),
                Err(_) => break,
            }
        } else {
            break;
        }

        changed = true;
    }

    Ok((lhs, changed))
}
