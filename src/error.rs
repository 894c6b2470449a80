//! Error types for the calculator core and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// An error raised by the calculator core.
///
/// Every position is a byte offset into the original expression text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{literal}' at position {pos}")]
    InvalidNumber { literal: String, pos: usize },

    #[error("unmatched '{paren}' at position {pos}")]
    UnmatchedParen { paren: char, pos: usize },

    #[error("operator '{op}' at position {pos} is missing an operand")]
    MissingOperand { op: char, pos: usize },

    #[error("expression left {remaining} values instead of one")]
    MalformedResult { remaining: usize },

    #[error("division by zero at position {pos}")]
    DivisionByZero { pos: usize },
}

/// Coarse classification of a [`CalcError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    UnmatchedParen,
    Arity,
    MalformedResult,
    DivideByZero,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedChar { .. } | Self::InvalidNumber { .. } => ErrorKind::Lex,
            Self::UnmatchedParen { .. } => ErrorKind::UnmatchedParen,
            Self::MissingOperand { .. } => ErrorKind::Arity,
            Self::MalformedResult { .. } => ErrorKind::MalformedResult,
            Self::DivisionByZero { .. } => ErrorKind::DivideByZero,
        }
    }
}

pub type Result<T, E = CalcError> = std::result::Result<T, E>;

/// Errors that can occur when loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}' in {path}: {reason}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}
