//! Tokens shared by the lexer, the converter and the evaluator.

use std::fmt;
use std::ops::Range;

pub type Span = Range<usize>;

/// A value tagged with the byte range of the source text it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned<T> {
    pub elem: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(elem: T, span: Span) -> Self {
        Self { elem, span }
    }

    /// Byte offset of the first character.
    pub fn pos(&self) -> usize {
        self.span.start
    }
}

pub type SpannedTok = Spanned<Token>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    LParen,
    RParen,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::LParen => '(',
            Self::RParen => ')',
        }
    }

    /// Binding strength of a binary operator. Parentheses have none.
    pub fn precedence(self) -> Option<u8> {
        match self {
            Self::Add | Self::Sub => Some(1),
            Self::Mul | Self::Div => Some(2),
            Self::LParen | Self::RParen => None,
        }
    }

    pub fn is_binary(self) -> bool {
        self.precedence().is_some()
    }
}

impl TryFrom<char> for Operator {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Ok(match value {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            '(' => Self::LParen,
            ')' => Self::RParen,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single lexical unit: either a number or an operator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Operand(f64),
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(value) => write!(f, "{}", value),
            Self::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}
