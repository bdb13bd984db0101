//! Money display helpers.
//!
//! Monetary amounts are stored and computed as integer cents everywhere; the
//! conversion to a human-readable decimal string happens only at presentation
//! time. The formatted string is never parsed back into a computation.

/// Render integer cents as a decimal string with exactly two fractional
/// digits, e.g. `1999` → `"19.99"`, `5` → `"0.05"`.
pub fn cents_to_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
