use crate::parser::{
    ast::{expr::Expr, func::Func},
    call::SPECIAL_FORMS,
    error::{kind, Error},
    token::{Assign as AssignOp, CloseParen, Name, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;
use std::ops::Range;

/// A function header, such as `f(x, y)`, found on the left-hand side of a function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncHeader {
    /// The name of the function.
    pub name: String,

    /// The names of the parameters.
    pub params: Vec<String>,

    /// The region of the source code that this function header was parsed from.
    pub span: Range<usize>,
}

impl Parse for FuncHeader {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        input.try_parse::<OpenParen>()?;
        let params = if input.peek_kind() == Some(TokenKind::CloseParen) {
            Vec::new()
        } else {
            input.try_parse_delimited(TokenKind::Comma, |input| input.try_parse::<Name>())?
        };
        let close_paren = input.try_parse::<CloseParen>()?;

        Ok(Self {
            name: name.lexeme,
            params: params.into_iter().map(|param| param.lexeme).collect(),
            span: name.span.start..close_paren.span.end,
        })
    }
}

/// The target of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// A variable, as in `x = 5`.
    Symbol(String),

    /// A function definition, as in `f(x) = x^2`.
    Func(FuncHeader),
}

impl Parse for AssignTarget {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<FuncHeader>().map(AssignTarget::Func)
            .or_else(|_| input.try_parse::<Name>().map(|name| AssignTarget::Symbol(name.lexeme)))
    }
}

/// An assignment to a variable or a function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// The target to assign to.
    pub target: AssignTarget,

    /// The value to assign.
    pub value: Expr,

    /// The region of the source code that this assignment was parsed from.
    pub span: Range<usize>,
}

impl Assign {
    /// Returns true if the assignment defines a function that calls itself.
    pub fn is_recursive(&self) -> bool {
        match &self.target {
            AssignTarget::Func(header) => self.value.post_order_iter()
                .any(|expr| matches!(expr, Expr::Call(name, _) if *name == header.name)),
            AssignTarget::Symbol(_) => false,
        }
    }
}

impl Parse for Assign {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let start = input.span().start;
        let target = input.try_parse::<AssignTarget>()?;
        input.try_parse::<AssignOp>()?;

        // the `=` makes this unambiguously an assignment, so every error from here on is fatal
        if let AssignTarget::Func(header) = &target {
            if Func::from_name(&header.name).is_some() || SPECIAL_FORMS.contains(&header.name.as_str()) {
                return Err(Error::new_fatal(header.span.clone(), kind::RedefineBuiltin {
                    name: header.name.clone(),
                }));
            }
        }

        let value = input.try_parse::<Expr>().map_err(Error::into_fatal)?;
        let end = input.prev_token().map_or(start, |token| token.span.end);

        Ok(Self {
            target,
            value,
            span: start..end,
        })
    }
}

impl From<Assign> for Expr {
    fn from(assign: Assign) -> Self {
        match assign.target {
            AssignTarget::Symbol(name) => Expr::Assign(name, Box::new(assign.value)),
            AssignTarget::Func(header) => Expr::FuncDef(header.name, header.params, Box::new(assign.value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn assign(source: &str) -> Result<Assign, Error> {
        Parser::new(source).unwrap().try_parse_full::<Assign>()
    }

    #[test]
    fn header() {
        let assign = assign("area(w, h) = w h").unwrap();
        assert_eq!(assign.target, AssignTarget::Func(FuncHeader {
            name: "area".to_string(),
            params: vec!["w".to_string(), "h".to_string()],
            span: 0..10,
        }));
        assert_eq!(assign.span, 0..16);
        assert!(!assign.is_recursive());
    }

    #[test]
    fn recursive() {
        let assign = assign("fact(n) = if(n <= 1, 1, n fact(n - 1))").unwrap();
        assert!(assign.is_recursive());
    }

    #[test]
    fn missing_value_is_fatal() {
        let err = assign("x = ").unwrap_err();
        assert!(err.fatal);
    }

    #[test]
    fn special_forms_are_reserved() {
        let err = assign("if(a, b, c) = a").unwrap_err();
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::RedefineBuiltin { name: "if".to_string() }),
        );
    }
}
