//! Tokenizer, parser, and expression tree for symcalc.
//!
//! ```
//! use symcalc_parser::{parse, parser::ast::Expr};
//!
//! let expr = parse("2x + 1").unwrap();
//! assert!(expr.contains_symbol("x"));
//! assert_eq!(expr.to_string(), "2 * x + 1");
//! ```

pub mod parser;
pub mod tokenizer;

use parser::{ast::Expr, Parser};
use symcalc_error::Error;
use tokenizer::Token;

/// Parses the given source into an expression. The whole source must form a single expression.
///
/// Returns a lex error if the source contains an unrecognized character or a malformed literal,
/// and a parse error if the tokens do not form an expression.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let mut parser = Parser::new(source)?;
    Ok(parser.try_parse_full::<Expr>()?)
}

/// Parses already tokenized source into an expression.
pub fn parse_tokens(tokens: Box<[Token]>) -> Result<Expr, Error> {
    let mut parser = Parser::from_tokens(tokens);
    Ok(parser.try_parse_full::<Expr>()?)
}
