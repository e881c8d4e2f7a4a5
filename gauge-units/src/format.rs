//! Display formatting of unit values

use serde::{Deserialize, Serialize};

/// Text shown for values that cannot be represented (unbound caliber, NaN)
pub const NOT_AVAILABLE: &str = "N/A";

/// How a unit renders its display value as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    /// About three significant figures, at most two decimals, exponent form
    /// above one million
    Significant,
    /// Exactly this many decimals
    Fixed(usize),
    /// At most this many decimals, trailing zeros dropped
    UpTo(usize),
}

impl Style {
    pub fn render(self, value: f64) -> String {
        if !value.is_finite() {
            return NOT_AVAILABLE.to_string();
        }
        match self {
            Style::Significant => significant(value),
            Style::Fixed(decimals) => fixed(value, decimals),
            Style::UpTo(decimals) => trim_zeros(fixed(value, decimals)),
        }
    }
}

fn significant(value: f64) -> String {
    let abs = value.abs();
    if abs > 1e6 {
        return format!("{:.2E}", value);
    }
    if abs >= 100.0 {
        return fixed(value, 0);
    }
    if abs <= 0.005 {
        return "0".to_string();
    }

    let mut scaled = abs;
    let mut mul = 1.0;
    while scaled < 100.0 {
        mul *= 10.0;
        scaled *= 10.0;
    }
    let rounded = value.signum() * scaled.round() / mul;
    trim_zeros(fixed(rounded, 2))
}

fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    // "-0.00" and friends
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        return text[1..].to_string();
    }
    text
}

fn trim_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

const MAX_DECIMALS: usize = 9;

/// Number of decimals needed to show multiples of `precision`
pub fn decimals_for(precision: f64) -> usize {
    if !(precision.is_finite() && precision > 0.0) {
        return 0;
    }
    (0..MAX_DECIMALS)
        .find(|&d| {
            let scaled = precision * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.max(1.0)
        })
        .unwrap_or(MAX_DECIMALS)
}
