//! Expression detection for free-form input.
//!
//! Decides whether a line of user input looks like arithmetic worth
//! handing to the calculator, before any tokenizing happens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches strings built only from the calculator's alphabet.
    static ref EXPRESSION_CHARS: Regex = Regex::new(r"^[\d\s\.\+\-\*/()]+$").unwrap();

    /// Matches parentheses that contain something (not empty).
    static ref HAS_PARENS: Regex = Regex::new(r"\([^)]+\)").unwrap();

    /// A plain number, optionally negative.
    static ref PLAIN_NUMBER: Regex = Regex::new(r"^-?\s*(\d+\.?\d*|\.\d+)$").unwrap();
}

/// Check if input looks like a potential calculator expression.
///
/// Returns `true` if the input:
/// 1. Contains only digits, dots, whitespace, operators and parentheses
/// 2. Is not just a plain number
/// 3. Has at least one binary operator or non-trivial parentheses
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.len() < 2 {
        return false;
    }

    if !EXPRESSION_CHARS.is_match(trimmed) {
        return false;
    }

    if PLAIN_NUMBER.is_match(trimmed) {
        return false;
    }

    has_operator(trimmed) || HAS_PARENS.is_match(trimmed)
}

/// Check if input contains a binary operator.
fn has_operator(input: &str) -> bool {
    if input.contains(['+', '*', '/']) {
        return true;
    }

    // A minus only counts when something it could subtract from precedes it.
    input.char_indices().any(|(i, c)| {
        c == '-'
            && input[..i]
                .chars()
                .rev()
                .find(|ch| !ch.is_whitespace())
                .is_some_and(|prev| prev.is_ascii_digit() || prev == ')' || prev == '.')
    })
}
