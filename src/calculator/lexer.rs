//! Scanner turning expression text into tokens.

use std::iter::Peekable;
use std::str::CharIndices;

use super::token::{Operator, Spanned, SpannedTok, Token};
use crate::error::{CalcError, Result};

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Scan the whole source, stopping at the first lexical error.
    pub fn tokenize(self) -> Result<Vec<SpannedTok>> {
        self.collect()
    }

    /// Scan a number literal whose first character sits at `start`.
    ///
    /// Digits are consumed greedily along with at most one decimal point;
    /// a second point is left for the next token.
    fn number(&mut self, start: usize, first: char) -> Result<SpannedTok> {
        let mut seen_dot = first == '.';
        let mut end = start + 1;
        loop {
            match self.chars.peek() {
                Some(&(pos, c)) if c.is_ascii_digit() => end = pos + 1,
                Some(&(pos, '.')) if !seen_dot => {
                    seen_dot = true;
                    end = pos + 1;
                }
                _ => break,
            }
            self.chars.next();
        }

        let literal = &self.source[start..end];
        let invalid = || CalcError::InvalidNumber {
            literal: literal.to_string(),
            pos: start,
        };
        if !literal.bytes().any(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value = literal.parse::<f64>().map_err(|_| invalid())?;
        Ok(Spanned::new(Token::Operand(value), start..end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<SpannedTok>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (pos, c) = self.chars.next()?;
            return Some(match c {
                ' ' | '\t' | '\n' | '\r' | '\x0c' => continue,
                c if c.is_ascii_digit() || c == '.' => self.number(pos, c),
                c => match Operator::try_from(c) {
                    Ok(op) => Ok(Spanned::new(Token::Operator(op), pos..pos + 1)),
                    Err(()) => Err(CalcError::UnexpectedChar { ch: c, pos }),
                },
            });
        }
    }
}

/// Tokenize `source` into a flat list of spanned tokens.
pub fn tokenize(source: &str) -> Result<Vec<SpannedTok>> {
    Lexer::new(source).tokenize()
}
