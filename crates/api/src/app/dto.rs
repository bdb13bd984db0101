//! Presentation shapes.
//!
//! Totals are computed from the item list at view-construction time and
//! exposed as integer cents plus a formatted decimal string with the fixed
//! currency symbol. The formatted strings are display-only and never flow
//! back into computation.

use serde::Serialize;

use invoicer_core::money::cents_to_price;
use invoicer_invoicing::Invoice;

/// Fixed display currency of the system.
pub const CURRENCY_SYMBOL: &str = "€";

/// An invoice plus its derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    #[serde(flatten)]
    invoice: Invoice,
    subtotal_cents: i64,
    tax_total_cents: i64,
    total_cents: i64,
    subtotal: String,
    tax_total: String,
    total: String,
}

impl From<Invoice> for InvoiceView {
    fn from(invoice: Invoice) -> Self {
        let subtotal_cents = invoice.subtotal_cents();
        let tax_total_cents = invoice.tax_total_cents();
        let total_cents = invoice.total_cents();
        Self {
            subtotal: format!("{} {CURRENCY_SYMBOL}", cents_to_price(subtotal_cents)),
            tax_total: format!("{} {CURRENCY_SYMBOL}", cents_to_price(tax_total_cents)),
            total: format!("{} {CURRENCY_SYMBOL}", cents_to_price(total_cents)),
            subtotal_cents,
            tax_total_cents,
            total_cents,
            invoice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_core::{FixedClock, SequentialIdGenerator};
    use invoicer_invoicing::{InvoiceInit, InvoiceItem};

    use chrono::{TimeZone, Utc};

    #[test]
    fn view_carries_cents_and_formatted_totals() {
        let ids = SequentialIdGenerator::new();
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        let invoice = Invoice::new(
            InvoiceInit {
                items: vec![
                    InvoiceItem {
                        id: "a".to_string(),
                        name: "line".to_string(),
                        description: String::new(),
                        quantity: 1.0,
                        price_cents: 1000,
                        tax_percentage: 19.0,
                    },
                    InvoiceItem {
                        id: "b".to_string(),
                        name: "line".to_string(),
                        description: String::new(),
                        quantity: 2.0,
                        price_cents: 500,
                        tax_percentage: 0.0,
                    },
                ],
                ..InvoiceInit::default()
            },
            &ids,
            &clock,
        )
        .unwrap();

        let view = InvoiceView::from(invoice);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["subtotalCents"], 2000);
        assert_eq!(value["taxTotalCents"], 190);
        assert_eq!(value["totalCents"], 2190);
        assert_eq!(value["total"], "21.90 €");
        assert!(value.get("items").is_some());
    }
}
