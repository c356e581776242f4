use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A parenthesized expression. Parentheses only group; they leave no trace in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    /// The inner expression.
    pub expr: Expr,

    /// The region of the source code that this parenthesized expression was parsed from.
    pub span: Range<usize>,
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;

        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let close_paren = input.try_parse::<CloseParen>()?;
            return Err(Error::new_fatal(
                open_paren.span.start..close_paren.span.end,
                kind::EmptyParenthesis,
            ));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new_fatal(
                open_paren.span.clone(),
                kind::UnclosedParenthesis { opening: true },
            ))?;

        Ok(Self {
            expr,
            span: open_paren.span.start..close_paren.span.end,
        })
    }
}

impl From<Paren> for Expr {
    fn from(paren: Paren) -> Self {
        paren.expr
    }
}
