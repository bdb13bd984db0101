//! Operation handlers, grouped per entity.
//!
//! Each module contributes its operations to the registry at startup.

pub mod customers;
pub mod invoices;
pub mod products;
