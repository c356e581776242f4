use ariadne::Fmt;
use symcalc_attrs::ErrorKind;
use symcalc_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error. This should only be used for non-fatal errors, as it contains
/// no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "an internal non-fatal error occurred while parsing",
    labels = ["here"],
    help = "you should never see this error; please report this as a bug"
)]
pub struct NonFatal;

/// A character that cannot start any token.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = format!("unrecognized character `{}`", character),
    labels = ["this character"],
)]
pub struct InvalidCharacter {
    /// The character that was found.
    pub character: char,
}

/// A number literal with a dangling or repeated decimal point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = format!("malformed number `{}`", lexeme),
    labels = ["this number"],
    help = format!("numbers look like {}, {}, or {}", "12".fg(EXPR), "1.5".fg(EXPR), "3e-4".fg(EXPR)),
)]
pub struct MalformedNumber {
    /// The text of the malformed number.
    pub lexeme: String,
}

/// A string literal without its closing quote.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Lex,
    message = "unterminated string",
    labels = ["this string is never closed"],
    help = "add a closing quote `\"` at the end of the string",
)]
pub struct UnterminatedString;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A brace was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "unclosed brace",
    labels = ["this brace is not closed"],
    help = "add a closing brace `}` after the last element",
)]
pub struct UnclosedBrace;

/// The rows of a matrix literal have different lengths.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "matrix rows have different lengths",
    labels = [format!("this row has {} element(s)", found)],
    help = format!("every row must have {} element(s), like the first row", expected),
)]
pub struct RaggedMatrix {
    /// The length of the first row.
    pub expected: usize,

    /// The length of the offending row.
    pub found: usize,
}

/// A builtin function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("wrong number of arguments given to the `{}` function", name),
    labels = ["this function call"],
    help = match max {
        Some(max) if max == min => format!("the `{}` function takes {} argument(s); {} given", name.fg(EXPR), min, given),
        Some(max) => format!("the `{}` function takes {} to {} arguments; {} given", name.fg(EXPR), min, max, given),
        None => format!("the `{}` function takes at least {} argument(s); {} given", name.fg(EXPR), min, given),
    },
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The minimum number of arguments.
    pub min: usize,

    /// The maximum number of arguments, or [`None`] if the function is variadic.
    pub max: Option<usize>,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A builtin function name was used as the name of a user-defined function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("cannot redefine the builtin function `{}`", name),
    labels = ["this function header"],
    help = "choose a different name for your function",
)]
pub struct RedefineBuiltin {
    /// The name of the builtin function.
    pub name: String,
}

/// The target of a unit conversion was not a unit name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = "expected a unit name",
    labels = ["this should be a unit, such as `ft` or `deg`"],
)]
pub struct ExpectedUnitName;

/// The first argument of a summation or product was not a variable name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Parse,
    message = format!("the first argument of `{}` must be a variable name", name),
    labels = ["this should be the index variable"],
    help = format!("for example: {}", format!("{}(n, 1, 10, n^2)", name).fg(EXPR)),
)]
pub struct ExpectedIndexVariable {
    /// The name of the summation-like function.
    pub name: &'static str,
}
