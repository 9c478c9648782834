//! Lenient number parsing and display formatting for card values.

use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace
/// and thousands separators. Returns `NaN` when there is no numeric prefix.
pub fn parse_decimal(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    let trimmed = cleaned.trim_start();
    LEADING_NUMBER
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// en-US style grouping with at most three fraction digits: `1234567.5` → `1,234,567.5`.
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = round_half_away(value.abs(), 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Two-decimal percentage, e.g. `-20.00%`. Exact halves round away from zero.
pub fn format_percent(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}%", round_half_away(value.abs(), 2))
}

/// Fixed-point rendering of a finite, non-negative `value` with `digits`
/// fraction digits, rounding an exact half up.
///
/// `{:.N}` formatting rounds exact binary ties to even (`12.125` → `12.12`),
/// so the rounding is done here on the value's full decimal expansion. Every
/// finite `f64` has at most 1074 fraction digits.
fn round_half_away(value: f64, digits: usize) -> String {
    let exact = format!("{value:.1074}");
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut kept: Vec<u8> = int_part.bytes().chain(frac.iter().take(digits).copied()).collect();
    let mut int_len = int_part.len();

    if frac.get(digits).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(kept.len() + 1);
    for (i, &d) in kept.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(d));
    }
    out
}
