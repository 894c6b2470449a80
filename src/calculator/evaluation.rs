//! Expression evaluation pipeline and result formatting.
//!
//! Ties the converter and the postfix evaluator together and turns the
//! outcome into something a front end can show or copy.

use serde::Serialize;
use tracing::debug;

use super::conversion::to_postfix;
use super::evaluator::{DivisionPolicy, Evaluator};
use crate::config::Config;
use crate::error::{CalcError, Result};

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (with thousand separators).
        display_result: String,
        /// Formatted for clipboard (raw number).
        clipboard_result: String,
    },
    /// The expression was rejected, or evaluated to a non-finite value.
    Error {
        /// The original expression.
        expression: String,
        /// Error message to display.
        message: String,
        /// The underlying error. `None` for infinite and NaN results.
        #[serde(skip)]
        error: Option<CalcError>,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success {
                clipboard_result, ..
            } => Some(clipboard_result),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => error.as_ref(),
        }
    }
}

/// How numbers are rendered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub thousands_separator: bool,
    pub max_decimals: usize,
}

impl FormatOptions {
    /// Decimals beyond this carry no information for an `f64`.
    pub const MAX_DECIMALS: usize = 17;
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            thousands_separator: true,
            max_decimals: 10,
        }
    }
}

/// Converts expressions to postfix, evaluates them and formats the outcome.
#[derive(Clone, Copy, Debug, Default)]
pub struct Calculator {
    evaluator: Evaluator,
    format: FormatOptions,
}

impl Calculator {
    pub fn new(division: DivisionPolicy, format: FormatOptions) -> Self {
        Self {
            evaluator: Evaluator::new(division),
            format,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.division, config.format_options())
    }

    /// Evaluate `input` to a number.
    pub fn evaluate(&self, input: &str) -> Result<f64> {
        let postfix = to_postfix(input)?;
        let value = self.evaluator.evaluate(&postfix);
        debug!(input, %postfix, ?value, "evaluated expression");
        value
    }

    /// Evaluate `input` and prepare the outcome for presentation.
    pub fn calculate(&self, input: &str) -> CalcResult {
        let expression = input.trim().to_string();

        let value = match self.evaluate(&expression) {
            Ok(value) => value,
            Err(error) => {
                return CalcResult::Error {
                    expression,
                    message: error.to_string(),
                    error: Some(error),
                };
            }
        };

        if value.is_nan() {
            CalcResult::Error {
                expression,
                message: "Not a Number".to_string(),
                error: None,
            }
        } else if value.is_infinite() {
            let msg = if value.is_sign_positive() {
                "Infinity"
            } else {
                "-Infinity"
            };
            CalcResult::Error {
                expression,
                message: msg.to_string(),
                error: None,
            }
        } else {
            CalcResult::Success {
                expression,
                display_result: format_display(value, &self.format),
                clipboard_result: format_clipboard(value, self.format.max_decimals),
                value,
            }
        }
    }
}

/// Evaluate an expression with the default division policy.
pub fn evaluate_expression(input: &str) -> Result<f64> {
    Calculator::default().evaluate(input)
}

/// Format a number for display, optionally with thousand separators.
fn format_display(value: f64, options: &FormatOptions) -> String {
    let raw = format_clipboard(value, options.max_decimals);
    if !options.thousands_separator {
        return raw;
    }

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    format!("{}{}{}", sign, group_thousands(int_part), dec_part)
}

/// Insert a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a number for clipboard (raw number, no separators).
fn format_clipboard(value: f64, max_decimals: usize) -> String {
    let precision = max_decimals.min(FormatOptions::MAX_DECIMALS);
    let formatted = format!("{:.*}", precision, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
