//! Quantity string parsing - split "5 mm" into a number and a unit suffix
//!
//! A greedy run of `[0-9.,-]` is the number and everything after it
//! (trimmed) is the unit. Exponent notation ("1e3") and unit symbols that
//! begin with a digit, comma, dot or minus are not supported.

use crate::UnitError;

/// A value as typed: the number and the optional unit suffix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<'t> {
    pub value: f64,
    /// Trimmed suffix, `None` when nothing follows the number
    pub unit: Option<&'t str>,
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ',' || c == '-'
}

/// Split `text` into its numeric token and trailing unit text
pub fn split_quantity(text: &str) -> Result<Reading<'_>, UnitError> {
    let s = text.trim_start();

    let end = s
        .char_indices()
        .find(|&(_, c)| !is_numeric_char(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    let (token, rest) = s.split_at(end);
    if token.is_empty() {
        return Err(UnitError::NotANumber(text.trim().to_string()));
    }

    // the scan does not validate the token, the float parser does
    let value: f64 = token
        .parse()
        .map_err(|_| UnitError::NotANumber(token.to_string()))?;

    let rest = rest.trim();
    Ok(Reading {
        value,
        unit: (!rest.is_empty()).then_some(rest),
    })
}

/// Case-insensitive symbol comparison, used for typed unit suffixes
pub fn symbol_matches(typed: &str, symbol: &str) -> bool {
    typed.to_lowercase() == symbol.to_lowercase()
}

/// Normalized form of a symbol for tolerant lookup.
///
/// Superscript digits become ASCII digits and micro signs become `u`, then
/// everything but letters and ASCII digits is dropped and the rest lowercased.
pub fn approximate_key(symbol: &str) -> String {
    symbol
        .chars()
        .map(fold_char)
        .filter(|c| c.is_alphabetic() || c.is_ascii_digit())
        .flat_map(char::to_lowercase)
        .collect()
}

fn fold_char(c: char) -> char {
    match c {
        '\u{2070}' => '0',
        '\u{b9}' => '1',
        '\u{b2}' => '2',
        '\u{b3}' => '3',
        '\u{2074}' => '4',
        '\u{2075}' => '5',
        '\u{2076}' => '6',
        '\u{2077}' => '7',
        '\u{2078}' => '8',
        '\u{2079}' => '9',
        '\u{b5}' | '\u{3bc}' => 'u',
        other => other,
    }
}
