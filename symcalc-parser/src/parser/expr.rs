use crate::{
    parser::{
        assign::Assign,
        ast::expr::Expr,
        binary,
        call::Call,
        error::{kind, Error},
        literal::Literal,
        paren::Paren,
        unary,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
    try_parse_catch_fatal,
};

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            return Err(input.error_fatal(kind::UnclosedParenthesis { opening: false }));
        }

        let _ = try_parse_catch_fatal!(input.try_parse::<Assign>().map(Expr::from));
        let lhs = input.try_parse_with_fn(unary::parse_or_lower)?;
        Ok(binary::parse_expr(input, lhs, Precedence::Any)?.0)
    }
}

/// Parses a primary expression: a function call, a literal, or a parenthesized expression. These
/// are the operands that can directly follow another operand to form an implicit multiplication.
pub fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
    // function calls can overlap with literals, so we need to try parsing a function call first
    let _ = try_parse_catch_fatal!(input.try_parse::<Call>().map(Expr::from));
    let _ = try_parse_catch_fatal!(input.try_parse::<Literal>().map(Expr::from));

    input.try_parse::<Paren>().map(Expr::from)
}
