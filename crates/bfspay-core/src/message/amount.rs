//! Transaction amount normalization.
//!
//! The switch expects amounts with exactly two decimals (`100.00`). Amounts
//! are handled as strings end to end so no float rounding can change the
//! signed value.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount {0:?} is not a decimal number")]
    Malformed(String),
    #[error("amount {0:?} has more than two decimal places")]
    TooManyDecimals(String),
    #[error("amount {0:?} must be greater than zero")]
    NotPositive(String),
}

/// Render `raw` with exactly two decimals, e.g. `"100"` -> `"100.00"`.
pub fn normalize_amount(raw: &str) -> Result<String, AmountError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }
    let (int, frac) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return Err(AmountError::Malformed(raw.to_string()));
    }
    if s.ends_with('.') {
        return Err(AmountError::Malformed(raw.to_string()));
    }
    if frac.len() > 2 {
        return Err(AmountError::TooManyDecimals(raw.to_string()));
    }

    let int = int.trim_start_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let normalized = format!("{int}.{frac:0<2}");
    if normalized == "0.00" {
        return Err(AmountError::NotPositive(raw.to_string()));
    }
    Ok(normalized)
}
