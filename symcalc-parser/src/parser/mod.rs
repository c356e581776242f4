pub mod assign;
pub mod ast;
pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use error::{Error, kind};
use super::tokenizer::{tokenize, Token, TokenKind};
use symcalc_error::ErrorKind;
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro can also catch fatal errors and immediately short-circuit the parsing process.
///
/// If parsing is successful, the enclosing function returns the parsed value. Otherwise, the
/// macro evaluates to the error of the last attempted parsing function.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($expr:expr $(,)?) => {
        match $expr {
            Ok(value) => return Ok(value),
            Err(err) if err.fatal => return Err(err),
            // ignore this error and try the next parser, or return it
            Err(err) => err,
        }
    };
    ($expr:expr, $($rest:expr),+ $(,)?) => {{
        let _ = $crate::try_parse_catch_fatal!($expr);
        $crate::try_parse_catch_fatal!($($rest),+)
    }};
}

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source. Returns a lex error if the source cannot be
    /// tokenized.
    pub fn new(source: &'source str) -> Result<Self, symcalc_error::Error> {
        Ok(Self::from_tokens(tokenize(source)?))
    }

    /// Create a new parser over an already tokenized source.
    pub fn from_tokens(tokens: Box<[Token<'source>]>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(self.span(), kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(self.span(), kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream. Whitespace is skipped.
    pub fn span(&self) -> Range<usize> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if !token.is_whitespace() {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Parses a value from the given stream of tokens without advancing the stream, whether or
    /// not parsing succeeds.
    pub fn peek<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let result = T::parse(self);
        self.cursor = start;
        result
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses zero or more values from the given stream of tokens, each delimited
    /// by a certain token. Parsing stops before the first token that does not continue the list.
    ///
    /// A fatal error from any element aborts the whole list.
    pub fn try_parse_delimited<T, F>(&mut self, delimiter: TokenKind, mut f: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse_with_fn(&mut f) {
                Ok(value) => values.push(value),
                Err(err) if err.fatal => {
                    self.cursor = start;
                    return Err(err);
                },
                Err(err) => {
                    if values.is_empty() {
                        return Ok(values);
                    }
                    // a delimiter was consumed, so an element must follow it
                    self.cursor = start;
                    return Err(err);
                },
            }

            if self.peek_kind() == Some(delimiter) {
                self.next_token()?;
            } else {
                return Ok(values);
            }
        }
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_kind().is_none() {
            Ok(value)
        } else {
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of assignment (`=`).
    Assign,

    /// Precedence of the biconditional (`<->`).
    Biconditional,

    /// Precedence of implication (`->`).
    Implies,

    /// Precedence of logical or (`|`).
    Or,

    /// Precedence of logical and (`&`).
    And,

    /// Precedence of bitshifts (`<<` and `>>`).
    Shift,

    /// Precedence of comparisons (`>`, `>=`, `<`, `<=`, `==`, and `!=`).
    Compare,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and modulo (`%`), which separate
    /// factors. Implicit multiplication shares this precedence.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of factorial (`!`).
    Factorial,

    /// Precedence of logical not (`!`).
    Not,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{expr::Expr, func::Func};
    use token::op::{BinOpKind, UnaryOpKind};
    use symcalc_unit_convert::{Angle, Length, Unit};

    fn parse(source: &str) -> Expr {
        let mut parser = Parser::new(source).unwrap();
        parser.try_parse_full::<Expr>().unwrap()
    }

    fn parse_err(source: &str) -> Error {
        let mut parser = Parser::new(source).unwrap();
        parser.try_parse_full::<Expr>().unwrap_err()
    }

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn bin(op: BinOpKind, lhs: Expr, rhs: Expr) -> Expr {
        Expr::binary(op, lhs, rhs)
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), num(16.0));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.14"), num(3.14));
        assert_eq!(parse("2.5e3"), num(2500.0));
    }

    #[test]
    fn literal_bool_and_str() {
        assert_eq!(parse("true"), Expr::Boolean(true));
        assert_eq!(parse("false"), Expr::Boolean(false));
        assert_eq!(parse("\"hello\""), Expr::Str("hello".to_string()));
    }

    #[test]
    fn quantity_literal() {
        assert_eq!(parse("90 deg"), Expr::Quantity(90.0, Unit::Angle(Angle::Degree)));
        assert_eq!(parse("3ft"), Expr::Quantity(3.0, Unit::Length(Length::Foot)));
    }

    #[test]
    fn single_letter_unit_is_a_variable() {
        // `m` could be meters, but single letters are far more often variables
        assert_eq!(parse("2m"), bin(BinOpKind::Mul, num(2.0), sym("m")));
    }

    #[test]
    fn binary_left_associativity() {
        assert_eq!(
            parse("1 - 2 - 3"),
            bin(BinOpKind::Sub, bin(BinOpKind::Sub, num(1.0), num(2.0)), num(3.0)),
        );
    }

    #[test]
    fn binary_right_associativity() {
        assert_eq!(
            parse("2 ^ 3 ^ 4"),
            bin(BinOpKind::Exp, num(2.0), bin(BinOpKind::Exp, num(3.0), num(4.0))),
        );
        assert_eq!(
            parse("2 ** 3"),
            bin(BinOpKind::Exp, num(2.0), num(3.0)),
        );
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(
            parse("2 + 3 * 4"),
            bin(BinOpKind::Add, num(2.0), bin(BinOpKind::Mul, num(3.0), num(4.0))),
        );
        assert_eq!(
            parse("2 * 3 + 4"),
            bin(BinOpKind::Add, bin(BinOpKind::Mul, num(2.0), num(3.0)), num(4.0)),
        );
    }

    #[test]
    fn logical_precedence() {
        assert_eq!(
            parse("true & false | true"),
            bin(
                BinOpKind::Or,
                bin(BinOpKind::And, Expr::Boolean(true), Expr::Boolean(false)),
                Expr::Boolean(true),
            ),
        );
        assert_eq!(
            parse("p -> q <-> r"),
            bin(BinOpKind::Biconditional, bin(BinOpKind::Implies, sym("p"), sym("q")), sym("r")),
        );
        assert_eq!(
            parse("x < 2 & y >= 3"),
            bin(
                BinOpKind::And,
                bin(BinOpKind::Less, sym("x"), num(2.0)),
                bin(BinOpKind::GreaterEq, sym("y"), num(3.0)),
            ),
        );
    }

    #[test]
    fn unary_minus_binds_tighter_than_exp() {
        assert_eq!(
            parse("-x^2"),
            bin(BinOpKind::Exp, Expr::unary(UnaryOpKind::Neg, sym("x")), num(2.0)),
        );
        assert_eq!(
            parse("2^-x"),
            bin(BinOpKind::Exp, num(2.0), Expr::unary(UnaryOpKind::Neg, sym("x"))),
        );
    }

    #[test]
    fn factorial_and_not() {
        assert_eq!(
            parse("3!!"),
            Expr::unary(UnaryOpKind::Factorial, Expr::unary(UnaryOpKind::Factorial, num(3.0))),
        );
        assert_eq!(
            parse("!p & q"),
            bin(BinOpKind::And, Expr::unary(UnaryOpKind::Not, sym("p")), sym("q")),
        );
        assert_eq!(
            parse("-3!"),
            Expr::unary(UnaryOpKind::Neg, Expr::unary(UnaryOpKind::Factorial, num(3.0))),
        );
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x"), bin(BinOpKind::Mul, num(2.0), sym("x")));
        assert_eq!(
            parse("3(x + 1)"),
            bin(BinOpKind::Mul, num(3.0), bin(BinOpKind::Add, sym("x"), num(1.0))),
        );
        assert_eq!(
            parse("2sin(x)"),
            bin(BinOpKind::Mul, num(2.0), Expr::call1(Func::Sin, sym("x"))),
        );
        assert_eq!(
            parse("1 + 2x^2"),
            bin(
                BinOpKind::Add,
                num(1.0),
                bin(BinOpKind::Mul, num(2.0), bin(BinOpKind::Exp, sym("x"), num(2.0))),
            ),
        );
        assert_eq!(
            parse("2x y"),
            bin(BinOpKind::Mul, bin(BinOpKind::Mul, num(2.0), sym("x")), sym("y")),
        );
    }

    #[test]
    fn implicit_multiplication_after_factor() {
        assert_eq!(
            parse("4 / 2x"),
            bin(BinOpKind::Mul, bin(BinOpKind::Div, num(4.0), num(2.0)), sym("x")),
        );
    }

    #[test]
    fn function_calls() {
        assert_eq!(
            parse("log(8, 2)"),
            Expr::Func(Func::Log, vec![num(8.0), num(2.0)]),
        );
        assert_eq!(
            parse("f(1, x)"),
            Expr::Call("f".to_string(), vec![num(1.0), sym("x")]),
        );
        assert_eq!(parse("rand()"), Expr::Func(Func::Rand, vec![]));
    }

    #[test]
    fn special_forms() {
        assert_eq!(
            parse("if(x > 0, x, -x)"),
            Expr::If(
                Box::new(bin(BinOpKind::Greater, sym("x"), num(0.0))),
                Box::new(sym("x")),
                Box::new(Expr::unary(UnaryOpKind::Neg, sym("x"))),
            ),
        );
        assert_eq!(
            parse("convert(90 deg, rad)"),
            Expr::Convert(
                Box::new(Expr::Quantity(90.0, Unit::Angle(Angle::Degree))),
                "rad".to_string(),
            ),
        );
        assert_eq!(
            parse("summation(n, 1, 10, n^2)"),
            Expr::Summation(
                "n".to_string(),
                Box::new(num(1.0)),
                Box::new(num(10.0)),
                Box::new(bin(BinOpKind::Exp, sym("n"), num(2.0))),
            ),
        );
    }

    #[test]
    fn vectors_and_matrices() {
        assert_eq!(parse("{1, 2, 3}"), Expr::Vector(vec![num(1.0), num(2.0), num(3.0)]));
        assert_eq!(
            parse("{{1, 2}, {3, 4}}"),
            Expr::Matrix(vec![vec![num(1.0), num(2.0)], vec![num(3.0), num(4.0)]]),
        );
    }

    #[test]
    fn assignment() {
        assert_eq!(
            parse("x = 2 + 3"),
            Expr::Assign("x".to_string(), Box::new(bin(BinOpKind::Add, num(2.0), num(3.0)))),
        );
        assert_eq!(
            parse("f(x, y) = x y"),
            Expr::FuncDef(
                "f".to_string(),
                vec!["x".to_string(), "y".to_string()],
                Box::new(bin(BinOpKind::Mul, sym("x"), sym("y"))),
            ),
        );
    }

    #[test]
    fn equality_is_not_assignment() {
        assert_eq!(parse("x == 2"), bin(BinOpKind::Eq, sym("x"), num(2.0)));
    }

    #[test]
    fn parenthesized() {
        assert_eq!(
            parse("(1 + 2) * 3"),
            bin(BinOpKind::Mul, bin(BinOpKind::Add, num(1.0), num(2.0)), num(3.0)),
        );
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = parse_err("(1 + 2");
        assert!(err.fatal);
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::UnclosedParenthesis { opening: true }));
    }

    #[test]
    fn unopened_parenthesis() {
        let err = parse_err(")");
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn wrong_argument_count() {
        let err = parse_err("sin(1, 2)");
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::WrongArgumentCount {
                name: "sin".to_string(),
                min: 1,
                max: Some(1),
                given: 2,
            }),
        );
    }

    #[test]
    fn ragged_matrix() {
        let err = parse_err("{{1, 2}, {3}}");
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::RaggedMatrix { expected: 2, found: 1 }),
        );
    }

    #[test]
    fn redefine_builtin() {
        let err = parse_err("sin(x) = x");
        assert_eq!(
            err.kind.as_any().downcast_ref(),
            Some(&kind::RedefineBuiltin { name: "sin".to_string() }),
        );
    }

    #[test]
    fn trailing_operator() {
        let err = parse_err("1 +");
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::UnexpectedEof));

        let err = parse_err("1 2 =");
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::ExpectedEof));
    }

    #[test]
    fn empty_input() {
        let err = parse_err("");
        assert_eq!(err.kind.as_any().downcast_ref(), Some(&kind::UnexpectedEof));
    }
}
