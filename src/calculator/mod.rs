//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Scan expression text into tokens
//! - Convert infix token streams to postfix with the shunting-yard algorithm
//! - Evaluate postfix sequences on a value stack
//! - Detect if user input looks like a calculator expression
//! - Copy results to the clipboard

mod clipboard;
mod conversion;
mod detection;
mod evaluation;
mod evaluator;
mod lexer;
mod token;

pub use clipboard::copy_to_clipboard;
pub use conversion::{Postfix, convert, to_postfix};
pub use detection::looks_like_expression;
pub use evaluation::{CalcResult, Calculator, FormatOptions, evaluate_expression};
pub use evaluator::{DivisionPolicy, Evaluator};
pub use lexer::{Lexer, tokenize};
pub use token::{Operator, Span, Spanned, SpannedTok, Token};
