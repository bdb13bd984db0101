//! Monetary computation engine.
//!
//! Pure functions over an invoice's item list, returning integer cents.
//! Each line amount is rounded half-up to a whole cent *before* summing, so
//! the sum of displayed line amounts always equals the displayed aggregate —
//! an invoice must survive a line-by-line audit.
//!
//! No function here reads or writes anything but its arguments; any total
//! stored alongside an invoice is advisory and never authoritative.

use crate::invoice::InvoiceItem;

/// Round a non-negative cent amount half-up to a whole cent.
///
/// `f64::round` rounds half away from zero, which is half-up for the
/// non-negative amounts produced by validated items.
fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Net amount of one line: `price_cents * quantity`, rounded per line.
/// Quantity may be fractional (e.g. hours).
pub fn line_subtotal_cents(item: &InvoiceItem) -> i64 {
    round_cents(item.price_cents as f64 * item.quantity)
}

/// Tax amount of one line: `price_cents * quantity * tax_percentage / 100`,
/// rounded per line.
pub fn line_tax_cents(item: &InvoiceItem) -> i64 {
    round_cents(item.price_cents as f64 * item.quantity * item.tax_percentage / 100.0)
}

/// Sum of per-line net amounts.
pub fn subtotal_cents(items: &[InvoiceItem]) -> i64 {
    items.iter().map(line_subtotal_cents).sum()
}

/// Sum of per-line tax amounts.
pub fn tax_total_cents(items: &[InvoiceItem]) -> i64 {
    items.iter().map(line_tax_cents).sum()
}

/// Gross total: subtotal plus tax.
pub fn total_cents(items: &[InvoiceItem]) -> i64 {
    subtotal_cents(items) + tax_total_cents(items)
}
