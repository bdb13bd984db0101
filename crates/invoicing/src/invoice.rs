use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicer_core::{
    Clock, DomainError, DomainRecord, DomainResult, Filterable, IdGenerator, RecordId, RecordMeta,
    RecordSeed, apply_lifecycle_defaults,
};

use crate::totals;

/// One line of an invoice.
///
/// Owned exclusively by its parent invoice and embedded in the invoice's
/// persisted form; its `id` only needs to be unique within the parent's item
/// list (UI/update addressing), not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Numeric amount, may be fractional (e.g. hours).
    pub quantity: f64,
    pub price_cents: i64,
    pub tax_percentage: f64,
}

/// Aggregate: Invoice.
///
/// The item list is an ordered sequence; order is display-significant but
/// never affects the totals. Totals are always derived from the current item
/// list — no stored total is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(flatten)]
    meta: RecordMeta,
    items: Vec<InvoiceItem>,
    footer_text: Option<String>,
    customer_id: Option<RecordId>,
    invoice_number: Option<String>,
    invoiced_at: Option<DateTime<Utc>>,
    due_at: Option<DateTime<Utc>>,
}

/// Constructor input: business fields plus an optional identity seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceInit {
    pub seed: RecordSeed,
    pub items: Vec<InvoiceItem>,
    pub footer_text: Option<String>,
    pub customer_id: Option<RecordId>,
    pub invoice_number: Option<String>,
    pub invoiced_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Partial update: a field present overwrites, a field absent is untouched.
/// A supplied item list replaces the previous list wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct InvoicePatch {
    pub items: Option<Vec<InvoiceItem>>,
    pub footer_text: Option<String>,
    pub customer_id: Option<RecordId>,
    pub invoice_number: Option<String>,
    pub invoiced_at: Option<DateTime<Utc>>,
    pub due_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn new(init: InvoiceInit, ids: &dyn IdGenerator, clock: &dyn Clock) -> DomainResult<Self> {
        let meta = apply_lifecycle_defaults(init.seed, ids, clock)?;
        let invoice = Self {
            meta,
            items: init.items,
            footer_text: init.footer_text,
            customer_id: init.customer_id,
            invoice_number: init.invoice_number,
            invoiced_at: init.invoiced_at,
            due_at: init.due_at,
        };
        invoice.validate()?;
        Ok(invoice)
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn footer_text(&self) -> Option<&str> {
        self.footer_text.as_deref()
    }

    pub fn customer_id(&self) -> Option<RecordId> {
        self.customer_id
    }

    pub fn invoice_number(&self) -> Option<&str> {
        self.invoice_number.as_deref()
    }

    pub fn invoiced_at(&self) -> Option<DateTime<Utc>> {
        self.invoiced_at
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Net total in cents, derived from the current item list.
    pub fn subtotal_cents(&self) -> i64 {
        totals::subtotal_cents(&self.items)
    }

    /// Tax total in cents, derived from the current item list.
    pub fn tax_total_cents(&self) -> i64 {
        totals::tax_total_cents(&self.items)
    }

    /// Gross total in cents, derived from the current item list.
    pub fn total_cents(&self) -> i64 {
        totals::total_cents(&self.items)
    }

    /// Merge a partial set of fields and rewrite `updated_at`, even when the
    /// patch changed no visible field.
    pub fn update(&mut self, patch: InvoicePatch, now: DateTime<Utc>) {
        let InvoicePatch {
            items,
            footer_text,
            customer_id,
            invoice_number,
            invoiced_at,
            due_at,
        } = patch;

        if let Some(v) = items {
            self.items = v;
        }
        if let Some(v) = footer_text {
            self.footer_text = Some(v);
        }
        if let Some(v) = customer_id {
            self.customer_id = Some(v);
        }
        if let Some(v) = invoice_number {
            self.invoice_number = Some(v);
        }
        if let Some(v) = invoiced_at {
            self.invoiced_at = Some(v);
        }
        if let Some(v) = due_at {
            self.due_at = Some(v);
        }

        self.touch(now);
    }

    /// Validation before persistence: item ids unique within the list,
    /// non-negative quantities and prices, tax rates in `0..=100`.
    pub fn validate(&self) -> DomainResult<()> {
        for item in &self.items {
            if item.quantity < 0.0 {
                return Err(DomainError::validation(format!(
                    "item '{}': quantity must not be negative",
                    item.id
                )));
            }
            if item.price_cents < 0 {
                return Err(DomainError::validation(format!(
                    "item '{}': price must not be negative",
                    item.id
                )));
            }
            if !(0.0..=100.0).contains(&item.tax_percentage) {
                return Err(DomainError::validation(format!(
                    "item '{}': tax percentage must be within 0..=100",
                    item.id
                )));
            }
        }

        for (i, item) in self.items.iter().enumerate() {
            if self.items[..i].iter().any(|other| other.id == item.id) {
                return Err(DomainError::validation(format!(
                    "duplicate item id '{}' within invoice",
                    item.id
                )));
            }
        }

        Ok(())
    }
}

impl DomainRecord for Invoice {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn with_meta(meta: RecordMeta) -> Self {
        Self {
            meta,
            items: Vec::new(),
            footer_text: None,
            customer_id: None,
            invoice_number: None,
            invoiced_at: None,
            due_at: None,
        }
    }
}

/// Structural `where` filter for invoice listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceFilter {
    pub customer_id: Option<RecordId>,
}

impl Filterable for Invoice {
    type Filter = InvoiceFilter;

    fn matches(&self, filter: &Self::Filter) -> bool {
        match filter.customer_id {
            Some(customer_id) => self.customer_id == Some(customer_id),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use invoicer_core::{FixedClock, SequentialIdGenerator};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn item(id: &str, price_cents: i64, quantity: f64, tax_percentage: f64) -> InvoiceItem {
        InvoiceItem {
            id: id.to_string(),
            name: "line".to_string(),
            description: String::new(),
            quantity,
            price_cents,
            tax_percentage,
        }
    }

    fn test_invoice() -> Invoice {
        let ids = SequentialIdGenerator::new();
        let clock = FixedClock::at(test_time());
        Invoice::new(
            InvoiceInit {
                items: vec![item("a", 1000, 1.0, 19.0), item("b", 500, 2.0, 0.0)],
                invoice_number: Some("2024-0001".to_string()),
                ..InvoiceInit::default()
            },
            &ids,
            &clock,
        )
        .unwrap()
    }

    #[test]
    fn totals_derive_from_current_item_list() {
        let mut invoice = test_invoice();
        assert_eq!(invoice.subtotal_cents(), 2000);
        assert_eq!(invoice.tax_total_cents(), 190);
        assert_eq!(invoice.total_cents(), 2190);

        invoice.update(
            InvoicePatch {
                items: Some(vec![item("a", 333, 1.0, 19.0)]),
                ..InvoicePatch::default()
            },
            test_time() + chrono::Duration::minutes(1),
        );
        assert_eq!(invoice.subtotal_cents(), 333);
        assert_eq!(invoice.tax_total_cents(), 63);
        assert_eq!(invoice.total_cents(), 396);
    }

    #[test]
    fn item_order_does_not_affect_totals() {
        let ids = SequentialIdGenerator::new();
        let clock = FixedClock::at(test_time());
        let forward = test_invoice();
        let reversed = Invoice::new(
            InvoiceInit {
                items: vec![item("b", 500, 2.0, 0.0), item("a", 1000, 1.0, 19.0)],
                ..InvoiceInit::default()
            },
            &ids,
            &clock,
        )
        .unwrap();
        assert_eq!(forward.total_cents(), reversed.total_cents());
    }

    #[test]
    fn duplicate_item_ids_fail_validation() {
        let ids = SequentialIdGenerator::new();
        let clock = FixedClock::at(test_time());
        let err = Invoice::new(
            InvoiceInit {
                items: vec![item("a", 100, 1.0, 0.0), item("a", 200, 1.0, 0.0)],
                ..InvoiceInit::default()
            },
            &ids,
            &clock,
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantity_fails_validation() {
        let mut invoice = test_invoice();
        invoice.update(
            InvoicePatch {
                items: Some(vec![item("a", 100, -1.0, 0.0)]),
                ..InvoicePatch::default()
            },
            test_time(),
        );
        assert!(invoice.validate().is_err());
    }

    #[test]
    fn patch_preserves_untouched_header_fields() {
        let mut invoice = test_invoice();
        let later = test_time() + chrono::Duration::minutes(5);

        invoice.update(
            InvoicePatch {
                footer_text: Some("Payable within 14 days.".to_string()),
                ..InvoicePatch::default()
            },
            later,
        );

        assert_eq!(invoice.footer_text(), Some("Payable within 14 days."));
        assert_eq!(invoice.invoice_number(), Some("2024-0001"));
        assert_eq!(invoice.items().len(), 2);
        assert_eq!(invoice.updated_at(), later);
    }

    #[test]
    fn items_are_embedded_in_persisted_shape() {
        let invoice = test_invoice();
        let value = serde_json::to_value(&invoice).unwrap();
        let items = value.get("items").and_then(|v| v.as_array()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].get("priceCents").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
