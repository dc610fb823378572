//! Numeric conversion and display helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the u64 range, returning 0 for non-finite or negative values.
#[must_use]
pub fn floor_f64_to_u64(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    let clamped = value.min(max).floor();
    cast::<f64, u64>(clamped).unwrap_or(u64::MAX)
}

/// Clamp a signed integer into the u64 range.
#[must_use]
pub fn clamp_i64_to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Apply a whole-number percentage to an amount, rounding up to the next unit.
#[must_use]
pub fn percent_ceil(amount: u64, pct: u64) -> u64 {
    let scaled = u128::from(amount) * u128::from(pct);
    u64::try_from(scaled.div_ceil(100)).unwrap_or(u64::MAX)
}

/// Group digits in threes with commas, the way `toLocaleString` renders en-US integers.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render an amount as currency, e.g. `$12,500`.
#[must_use]
pub fn format_currency(symbol: &str, amount: u64) -> String {
    format!("{symbol}{}", group_thousands(amount))
}
