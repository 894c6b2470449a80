//! Infix to postfix conversion using the shunting-yard algorithm.

use std::fmt;

use tracing::trace;

use super::lexer::Lexer;
use super::token::{Operator, Spanned, SpannedTok, Token};
use crate::error::{CalcError, Result};

/// An expression in postfix order; the first token is consumed first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Postfix(Vec<SpannedTok>);

impl Postfix {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpannedTok> {
        self.0.iter()
    }
}

impl From<Vec<SpannedTok>> for Postfix {
    fn from(tokens: Vec<SpannedTok>) -> Self {
        Self(tokens)
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tok) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tok.elem)?;
        }
        Ok(())
    }
}

/// Scan `source` and convert it to postfix order.
pub fn to_postfix(source: &str) -> Result<Postfix> {
    convert(Lexer::new(source))
}

/// Reorder an infix token stream into postfix.
///
/// Operators of equal precedence are popped before the incoming one is
/// pushed, so chains like `10-2-3` group to the left.
pub fn convert<I>(tokens: I) -> Result<Postfix>
where
    I: IntoIterator<Item = Result<SpannedTok>>,
{
    let mut output = Vec::new();
    let mut stack: Vec<SpannedTok> = Vec::new();

    for tok in tokens {
        let tok = tok?;
        let elem = tok.elem;
        match elem {
            Token::Operand(_) => output.push(tok),
            Token::Operator(Operator::LParen) => stack.push(tok),
            Token::Operator(Operator::RParen) => loop {
                let Some(top) = stack.pop() else {
                    return Err(CalcError::UnmatchedParen {
                        paren: ')',
                        pos: tok.pos(),
                    });
                };
                if top.elem == Token::Operator(Operator::LParen) {
                    break;
                }
                output.push(top);
            },
            Token::Operator(op) => {
                let prec = op.precedence();
                while let Some(&Spanned {
                    elem: Token::Operator(top_op),
                    ..
                }) = stack.last()
                {
                    if !top_op.is_binary() || top_op.precedence() < prec {
                        break;
                    }
                    output.extend(stack.pop());
                }
                stack.push(tok);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.elem == Token::Operator(Operator::LParen) {
            return Err(CalcError::UnmatchedParen {
                paren: '(',
                pos: top.pos(),
            });
        }
        output.push(top);
    }

    let postfix = Postfix(output);
    trace!(%postfix, "converted to postfix");
    Ok(postfix)
}
