//! Infix arithmetic calculator.
//!
//! Expressions are scanned into tokens, reordered into postfix with the
//! shunting-yard algorithm and reduced on a value stack. Every call owns
//! its working state, so evaluation can run on any thread.

pub mod calculator;
pub mod config;
pub mod error;

pub use calculator::{CalcResult, Calculator, DivisionPolicy, evaluate_expression};
pub use config::Config;
pub use error::{CalcError, ConfigError, ErrorKind};
