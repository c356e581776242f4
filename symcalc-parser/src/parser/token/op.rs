//! Structs to help parse binary and unary operators.

use crate::{
    parser::{
        error::{kind, Error},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    /// Logical not, written `!a`.
    Not,

    /// Factorial, written `a!`.
    Factorial,

    /// Negation, written `-a`.
    Neg,
}

impl UnaryOpKind {
    /// Returns the precedence of the unary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Not => Precedence::Not,
            Self::Factorial => Precedence::Factorial,
            Self::Neg => Precedence::Neg,
        }
    }

    /// Returns the associativity of the unary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Neg | Self::Not => Associativity::Right,
            Self::Factorial => Associativity::Left,
        }
    }

    /// Returns the symbol used to write the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Not | Self::Factorial => "!",
            Self::Neg => "-",
        }
    }
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl UnaryOp {
    /// Returns the precedence of the unary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the unary operator.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }

    /// Parses a unary operator that appears in the given position relative to its operand. The
    /// `!` token is logical not before an operand, and factorial after one.
    pub fn parse_with_associativity(input: &mut Parser, associativity: Associativity) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match (token.kind, associativity) {
            (TokenKind::Sub, Associativity::Right) => UnaryOpKind::Neg,
            (TokenKind::Bang, Associativity::Right) => UnaryOpKind::Not,
            (TokenKind::Bang, Associativity::Left) => UnaryOpKind::Factorial,
            _ => return Err(Error::new(token.span, kind::UnexpectedToken {
                expected: match associativity {
                    Associativity::Right => &[TokenKind::Sub, TokenKind::Bang],
                    Associativity::Left => &[TokenKind::Bang],
                },
                found: token.kind,
            })),
        };

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    BitRight,
    BitLeft,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Eq,
    NotEq,
    And,
    Or,
    Implies,
    Biconditional,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
            Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq
                | Self::Eq | Self::NotEq => Precedence::Compare,
            Self::BitRight | Self::BitLeft => Precedence::Shift,
            Self::And => Precedence::And,
            Self::Or => Precedence::Or,
            Self::Implies => Precedence::Implies,
            Self::Biconditional => Precedence::Biconditional,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp | Self::Implies => Associativity::Right,
            Self::Mul | Self::Div | Self::Mod
                | Self::Add | Self::Sub
                | Self::BitRight | Self::BitLeft
                | Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq
                | Self::Eq | Self::NotEq
                | Self::And | Self::Or | Self::Biconditional => Associativity::Left,
        }
    }

    /// Returns the symbol used to write the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::BitRight => ">>",
            Self::BitLeft => "<<",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&",
            Self::Or => "|",
            Self::Implies => "->",
            Self::Biconditional => "<->",
        }
    }

    /// Returns true if swapping the operands never changes the result.
    pub fn is_commutative(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Mul | Self::Eq | Self::NotEq | Self::And | Self::Or | Self::Biconditional
        )
    }

    /// Returns true if the operator compares its operands, producing a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Greater | Self::GreaterEq | Self::Less | Self::LessEq | Self::Eq | Self::NotEq
        )
    }

    /// Returns true if the operator is a logical connective.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Implies | Self::Biconditional)
    }
}

/// A binary operator that takes two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Exp => Ok(BinOpKind::Exp),
            TokenKind::Mul => Ok(BinOpKind::Mul),
            TokenKind::Div => Ok(BinOpKind::Div),
            TokenKind::Mod => Ok(BinOpKind::Mod),
            TokenKind::Add => Ok(BinOpKind::Add),
            TokenKind::Sub => Ok(BinOpKind::Sub),
            TokenKind::BitRight => Ok(BinOpKind::BitRight),
            TokenKind::BitLeft => Ok(BinOpKind::BitLeft),
            TokenKind::Greater => Ok(BinOpKind::Greater),
            TokenKind::GreaterEq => Ok(BinOpKind::GreaterEq),
            TokenKind::Less => Ok(BinOpKind::Less),
            TokenKind::LessEq => Ok(BinOpKind::LessEq),
            TokenKind::Eq => Ok(BinOpKind::Eq),
            TokenKind::NotEq => Ok(BinOpKind::NotEq),
            TokenKind::And => Ok(BinOpKind::And),
            TokenKind::Or => Ok(BinOpKind::Or),
            TokenKind::Implies => Ok(BinOpKind::Implies),
            TokenKind::Biconditional => Ok(BinOpKind::Biconditional),
            _ => Err(Error::new(token.span.clone(), kind::UnexpectedToken {
                expected: &[
                    TokenKind::Exp,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Add,
                    TokenKind::Sub,
                ],
                found: token.kind,
            })),
        }?;

        Ok(Self {
            kind,
            span: token.span,
        })
    }
}
