use crate::{
    parser::{
        ast::{expr::Expr, func::Func},
        error::{kind, Error},
        token::{CloseParen, Name, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Names that are parsed into dedicated nodes instead of function calls.
pub const SPECIAL_FORMS: &[&str] = &["if", "convert", "summation", "product"];

/// A function call, such as `sin(x)` or `f(1, 2)`.
///
/// Calls to builtin functions are resolved when parsing, and their argument counts are checked.
/// The special forms `if`, `convert`, `summation`, and `product` parse into their own nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The resolved call.
    pub expr: Expr,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

/// Creates the error for a call with the wrong number of arguments.
fn wrong_argument_count(
    name: &str,
    (min, max): (usize, Option<usize>),
    given: usize,
    span: &Range<usize>,
) -> Error {
    Error::new_fatal(span.clone(), kind::WrongArgumentCount {
        name: name.to_owned(),
        min,
        max,
        given,
    })
}

/// Builds the node for a call, given the function name and its arguments.
fn resolve(name: &str, args: Vec<Expr>, span: &Range<usize>) -> Result<Expr, Error> {
    match name {
        "if" => {
            let [condition, then, otherwise] = <[Expr; 3]>::try_from(args)
                .map_err(|args| wrong_argument_count(name, (3, Some(3)), args.len(), span))?;
            Ok(Expr::If(Box::new(condition), Box::new(then), Box::new(otherwise)))
        },
        "convert" => {
            let [value, unit] = <[Expr; 2]>::try_from(args)
                .map_err(|args| wrong_argument_count(name, (2, Some(2)), args.len(), span))?;
            match unit {
                Expr::Symbol(unit) | Expr::Str(unit) => Ok(Expr::Convert(Box::new(value), unit)),
                _ => Err(Error::new_fatal(span.clone(), kind::ExpectedUnitName)),
            }
        },
        "summation" | "product" => {
            let [var, from, to, body] = <[Expr; 4]>::try_from(args)
                .map_err(|args| wrong_argument_count(name, (4, Some(4)), args.len(), span))?;
            let is_summation = name == "summation";
            let Expr::Symbol(var) = var else {
                let name = if is_summation { "summation" } else { "product" };
                return Err(Error::new_fatal(span.clone(), kind::ExpectedIndexVariable { name }));
            };

            let (from, to, body) = (Box::new(from), Box::new(to), Box::new(body));
            if is_summation {
                Ok(Expr::Summation(var, from, to, body))
            } else {
                Ok(Expr::Product(var, from, to, body))
            }
        },
        _ => match Func::from_name(name) {
            Some(func) if func.accepts(args.len()) => Ok(Expr::Func(func, args)),
            Some(func) => Err(wrong_argument_count(func.name(), func.arity(), args.len(), span)),
            None => Ok(Expr::Call(name.to_owned(), args)),
        },
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        let args = if input.peek_kind() == Some(TokenKind::CloseParen) {
            Vec::new()
        } else {
            input.try_parse_delimited(TokenKind::Comma, |input| input.try_parse::<Expr>())?
        };

        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new_fatal(
                open_paren.span.clone(),
                kind::UnclosedParenthesis { opening: true },
            ))?;

        let span = name.span.start..close_paren.span.end;
        let expr = resolve(&name.lexeme, args, &span)?;
        Ok(Self { expr, span })
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        call.expr
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(source: &str) -> Result<Call, Error> {
        Parser::new(source).unwrap().try_parse_full::<Call>()
    }

    #[test]
    fn user_call() {
        let call = call("g()").unwrap();
        assert_eq!(call.expr, Expr::Call("g".to_string(), vec![]));
        assert_eq!(call.span, 0..3);
    }

    #[test]
    fn variadic_builtin() {
        assert_eq!(
            call("max(1, 5, 3)").unwrap().expr,
            Expr::Func(Func::Max, vec![Expr::Number(1.0), Expr::Number(5.0), Expr::Number(3.0)]),
        );
    }

    #[test]
    fn convert_accepts_string_units() {
        assert_eq!(
            call("convert(3, \"ft\")").unwrap().expr,
            Expr::Convert(Box::new(Expr::Number(3.0)), "ft".to_string()),
        );
    }

    #[test]
    fn convert_requires_unit_name() {
        let err = call("convert(3, 4)").unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::ExpectedUnitName));
    }

    #[test]
    fn summation_requires_index_variable() {
        let err = call("product(2, 1, 3, n)").unwrap_err();
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::ExpectedIndexVariable { name: "product" }),
        );
    }

    #[test]
    fn too_few_arguments() {
        let err = call("gcd(4)").unwrap_err();
        assert_eq!(err.spans, vec![0..6]);
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::WrongArgumentCount { name: "gcd".to_string(), min: 2, max: None, given: 1 }),
        );
    }

    #[test]
    fn unclosed_call() {
        let err = call("sin(x").unwrap_err();
        assert_eq!(err.spans, vec![3..4]);
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::UnclosedParenthesis { opening: true }),
        );
    }
}
