use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::CloseCurly,
        Parse,
        Parser,
    },
    tokenizer::{Token, TokenKind},
};
use std::ops::Range;
use symcalc_unit_convert::Unit;

/// A literal value: a number, a dimensioned quantity, a boolean, a string, a variable, or a
/// vector or matrix written with braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The parsed value.
    pub expr: Expr,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// Attempts to parse a unit name directly after a number, as in `90 deg` or `3ft`.
///
/// Single-letter names are left alone, since `2m` is far more likely to mean `2 * m` than two
/// meters. A name followed by `(` is a function call, as in `2min(a, b)`.
fn parse_unit(input: &mut Parser) -> Result<(Unit, Range<usize>), Error> {
    let token = input.next_token()?;
    if token.kind != TokenKind::Name || token.lexeme.chars().count() < 2 {
        return Err(Error::new(token.span, kind::NonFatal));
    }
    if input.peek_kind() == Some(TokenKind::OpenParen) {
        return Err(Error::new(token.span, kind::NonFatal));
    }

    token.lexeme.parse::<Unit>()
        .map(|unit| (unit, token.span.clone()))
        .map_err(|_| Error::new(token.span, kind::NonFatal))
}

/// Parses the elements of a brace literal, after the opening brace.
fn parse_braces(input: &mut Parser, open: &Token) -> Result<Literal, Error> {
    let elems = if input.peek_kind() == Some(TokenKind::CloseCurly) {
        Vec::new()
    } else {
        input.try_parse_delimited(TokenKind::Comma, |input| input.try_parse::<Expr>())?
    };

    let close = input.try_parse::<CloseCurly>()
        .map_err(|_| Error::new_fatal(open.span.clone(), kind::UnclosedBrace))?;
    let span = open.span.start..close.span.end;

    // a brace literal whose elements are all brace literals is a matrix
    let is_matrix = !elems.is_empty() && elems.iter().all(|elem| matches!(elem, Expr::Vector(_)));
    if !is_matrix {
        return Ok(Literal { expr: Expr::Vector(elems), span });
    }

    let rows = elems.into_iter()
        .map(|elem| match elem {
            Expr::Vector(row) => row,
            _ => Vec::new(),
        })
        .collect::<Vec<_>>();
    let expected = rows[0].len();
    if let Some(row) = rows.iter().find(|row| row.len() != expected) {
        return Err(Error::new_fatal(span, kind::RaggedMatrix { expected, found: row.len() }));
    }

    Ok(Literal { expr: Expr::Matrix(rows), span })
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Number => {
                let value = token.number()
                    .ok_or_else(|| Error::new_fatal(token.span.clone(), kind::MalformedNumber {
                        lexeme: token.lexeme.to_owned(),
                    }))?;

                match input.try_parse_with_fn(parse_unit) {
                    Ok((unit, unit_span)) => Ok(Self {
                        expr: Expr::Quantity(value, unit),
                        span: token.span.start..unit_span.end,
                    }),
                    Err(_) => Ok(Self { expr: Expr::Number(value), span: token.span }),
                }
            },
            TokenKind::Name => {
                let expr = match token.lexeme {
                    "true" => Expr::Boolean(true),
                    "false" => Expr::Boolean(false),
                    name => Expr::symbol(name),
                };
                Ok(Self { expr, span: token.span })
            },
            TokenKind::Str => Ok(Self {
                expr: Expr::Str(token.text().unwrap_or_default().to_owned()),
                span: token.span,
            }),
            TokenKind::OpenCurly => parse_braces(input, &token),
            _ => Err(Error::new(token.span, kind::UnexpectedToken {
                expected: &[TokenKind::Number, TokenKind::Name, TokenKind::Str, TokenKind::OpenCurly],
                found: token.kind,
            })),
        }
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        literal.expr
    }
}
