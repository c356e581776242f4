use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// Multi-character operators are listed as their own tokens, so the longest match (`<=` before
/// `<`, `<->` before `<`, `**` before `*`) always wins.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("<->")]
    Biconditional,

    #[token("->")]
    Implies,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Mod,

    #[token("^")]
    #[token("**")]
    Exp,

    #[token(">")]
    Greater,

    #[token(">=")]
    GreaterEq,

    #[token("<")]
    Less,

    #[token("<=")]
    LessEq,

    /// `!`, which is logical not in prefix position and factorial in postfix position.
    #[token("!")]
    Bang,

    #[token("&")]
    And,

    #[token("|")]
    Or,

    #[token(">>")]
    BitRight,

    #[token("<<")]
    BitLeft,

    #[token("=")]
    Assign,

    #[regex(r"[a-zA-Z_α-ωΑ-Ω][a-zA-Z0-9_α-ωΑ-Ω]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    /// A number with a dangling decimal point, more than one of them, or a signed exponent with
    /// no digits.
    #[regex(r"[0-9]+\.")]
    #[regex(r"[0-9]+\.[0-9]+\.[0-9.]*")]
    #[regex(r"[0-9]+(\.[0-9]+)?[eE][+-]")]
    MalformedNumber,

    #[regex(r#""[^"]*""#)]
    Str,

    #[regex(r#""[^"]*"#)]
    UnterminatedStr,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("{")]
    OpenCurly,

    #[token("}")]
    CloseCurly,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::NewLine)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Returns the numeric payload of a [`TokenKind::Number`] token.
    pub fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number => self.lexeme.parse().ok(),
            _ => None,
        }
    }

    /// Returns the text payload of a [`TokenKind::Name`] or [`TokenKind::Str`] token. The quotes
    /// surrounding a string are not included.
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Name => Some(self.lexeme),
            TokenKind::Str => Some(&self.lexeme[1..self.lexeme.len() - 1]),
            _ => None,
        }
    }
}
