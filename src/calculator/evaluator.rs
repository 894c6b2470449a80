//! Stack evaluation of postfix sequences.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::conversion::Postfix;
use super::token::{Operator, Token};
use crate::error::{CalcError, Result};

/// What to do when the right operand of `/` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DivisionPolicy {
    /// Follow IEEE-754 and produce infinity or NaN.
    #[default]
    Ieee,
    /// Fail with [`CalcError::DivisionByZero`].
    Error,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator {
    division: DivisionPolicy,
}

impl Evaluator {
    pub fn new(division: DivisionPolicy) -> Self {
        Self { division }
    }

    /// Reduce a postfix sequence to a single value.
    ///
    /// Exactly one value must be left on the stack once every token has
    /// been consumed.
    pub fn evaluate(&self, postfix: &Postfix) -> Result<f64> {
        let mut values: Vec<f64> = Vec::with_capacity(postfix.len());

        for tok in postfix.iter() {
            let op = match tok.elem {
                Token::Operand(value) => {
                    values.push(value);
                    continue;
                }
                Token::Operator(op) => op,
            };

            let missing = CalcError::MissingOperand {
                op: op.symbol(),
                pos: tok.pos(),
            };
            let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                return Err(missing);
            };

            let result = match op {
                Operator::Add => left + right,
                Operator::Sub => left - right,
                Operator::Mul => left * right,
                Operator::Div => {
                    if right == 0.0 && self.division == DivisionPolicy::Error {
                        return Err(CalcError::DivisionByZero { pos: tok.pos() });
                    }
                    left / right
                }
                Operator::LParen | Operator::RParen => return Err(missing),
            };
            trace!(%left, %op, %right, %result, "applied operator");
            values.push(result);
        }

        match values.as_slice() {
            [value] => Ok(*value),
            rest => Err(CalcError::MalformedResult {
                remaining: rest.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::conversion::to_postfix;
    use crate::calculator::token::Spanned;

    fn eval(source: &str) -> Result<f64> {
        Evaluator::default().evaluate(&to_postfix(source)?)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("3+4*2"), Ok(11.0));
        assert_eq!(eval("(3+4)*2"), Ok(14.0));
        assert_eq!(eval("10-2-3"), Ok(5.0));
        assert_eq!(eval("2*3+4*5"), Ok(26.0));
        assert_eq!(eval("8/4"), Ok(2.0));
        assert_eq!(eval("7/2"), Ok(3.5));
        assert_eq!(eval("8/2/2"), Ok(2.0));
    }

    #[test]
    fn test_operand_order() {
        // Right operand is popped first.
        let postfix = Postfix::from(vec![
            Spanned::new(Token::Operand(1.0), 0..1),
            Spanned::new(Token::Operand(4.0), 2..3),
            Spanned::new(Token::Operator(Operator::Div), 4..5),
        ]);
        assert_eq!(Evaluator::default().evaluate(&postfix), Ok(0.25));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            eval("3+*4"),
            Err(CalcError::MissingOperand { op: '+', pos: 1 })
        );
        assert_eq!(eval("-3"), Err(CalcError::MissingOperand { op: '-', pos: 0 }));
        assert_eq!(eval("*"), Err(CalcError::MissingOperand { op: '*', pos: 0 }));
    }

    #[test]
    fn test_paren_in_postfix_is_rejected() {
        let postfix = Postfix::from(vec![
            Spanned::new(Token::Operand(1.0), 0..1),
            Spanned::new(Token::Operand(2.0), 1..2),
            Spanned::new(Token::Operator(Operator::LParen), 2..3),
        ]);
        assert_eq!(
            Evaluator::default().evaluate(&postfix),
            Err(CalcError::MissingOperand { op: '(', pos: 2 })
        );
    }

    #[test]
    fn test_malformed_result() {
        assert_eq!(eval(""), Err(CalcError::MalformedResult { remaining: 0 }));
        assert_eq!(eval("3 4"), Err(CalcError::MalformedResult { remaining: 2 }));
        assert_eq!(
            eval("(1)(2)(3)"),
            Err(CalcError::MalformedResult { remaining: 3 })
        );
    }

    #[test]
    fn test_division_by_zero_ieee() {
        assert_eq!(eval("1/0"), Ok(f64::INFINITY));
        assert_eq!(eval("0-1/0"), Ok(f64::NEG_INFINITY));
        assert!(eval("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_division_by_zero_error() {
        let evaluator = Evaluator::new(DivisionPolicy::Error);
        let postfix = to_postfix("1 + 2/(3-3)").unwrap();
        assert_eq!(
            evaluator.evaluate(&postfix),
            Err(CalcError::DivisionByZero { pos: 5 })
        );
        let postfix = to_postfix("1/4").unwrap();
        assert_eq!(evaluator.evaluate(&postfix), Ok(0.25));
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            division: DivisionPolicy,
        }
        let parsed: Wrapper = toml::from_str(r#"division = "error""#).unwrap();
        assert_eq!(parsed.division, DivisionPolicy::Error);
    }
}
