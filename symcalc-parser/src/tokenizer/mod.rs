pub mod token;

use crate::parser::error::kind::{InvalidCharacter, MalformedNumber, UnterminatedString};
use logos::{Lexer, Logos};
use symcalc_error::Error;
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn lex(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Returns a lex error if the input contains a character that cannot start any token, or a
/// malformed number or string literal.
pub fn tokenize(input: &str) -> Result<Box<[Token]>, Error> {
    let mut lexer = lex(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let lexeme = lexer.slice();
        match result {
            Ok(TokenKind::MalformedNumber) => {
                return Err(Error::new(vec![span], MalformedNumber { lexeme: lexeme.to_owned() }));
            },
            Ok(TokenKind::UnterminatedStr) => {
                return Err(Error::new(vec![span.start..span.start + 1], UnterminatedString));
            },
            Ok(kind) => tokens.push(Token { span, kind, lexeme }),
            Err(()) => {
                let character = lexeme.chars().next().unwrap_or_default();
                return Err(Error::new(vec![span], InvalidCharacter { character }));
            },
        }
    }

    Ok(tokens.into_boxed_slice())
}
