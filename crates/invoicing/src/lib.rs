//! Invoicing domain module.
//!
//! This crate contains the invoice aggregate (with its embedded line items)
//! and the monetary computation engine deriving subtotal, tax, and total from
//! the item list, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod invoice;
pub mod totals;

pub use invoice::{Invoice, InvoiceFilter, InvoiceInit, InvoiceItem, InvoicePatch};
pub use totals::{
    line_subtotal_cents, line_tax_cents, subtotal_cents, tax_total_cents, total_cents,
};
