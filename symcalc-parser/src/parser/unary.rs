//! Prefix and postfix unary operators.

use crate::{
    parser::{
        ast::expr::Expr,
        binary,
        error::Error,
        expr::parse_primary,
        token::op::UnaryOp,
        Associativity,
        Parser,
    },
    try_parse_catch_fatal,
};

/// Parses a prefix operator followed by its operand, such as `-x` or `!p`. The operand extends
/// through every binary operator that binds tighter than the prefix operator.
fn parse_prefix(input: &mut Parser) -> Result<Expr, Error> {
    let op = UnaryOp::parse_with_associativity(input, Associativity::Right)?;
    let operand = parse_or_lower(input)?;
    let (operand, _) = binary::parse_expr(input, operand, op.precedence())?;
    Ok(Expr::unary(op.kind, operand))
}

/// Parses a primary expression followed by any number of postfix operators, such as `3!!`.
pub fn parse_postfix_or_primary(input: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_primary(input)?;

    while let Ok(op) = input.try_parse_with_fn(|input| {
        UnaryOp::parse_with_associativity(input, Associativity::Left)
    }) {
        expr = Expr::unary(op.kind, expr);
    }

    Ok(expr)
}

/// Parses a unary expression, or a primary expression if there is no unary operator.
pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
    let _ = try_parse_catch_fatal!(input.try_parse_with_fn(parse_prefix));
    input.try_parse_with_fn(parse_postfix_or_primary)
}
