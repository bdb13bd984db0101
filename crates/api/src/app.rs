//! Application wiring: services plus the operation registry.

use std::sync::Arc;

use invoicer_core::{Clock, IdGenerator, SystemClock, UuidGenerator};
use invoicer_customers::Customer;
use invoicer_invoicing::Invoice;
use invoicer_products::Product;
use invoicer_store::MemoryRepository;

use crate::app::registry::Registry;
use crate::app::services::{CustomerService, InvoiceService, ProductService};

pub mod dto;
pub mod ops;
pub mod registry;
pub mod services;

/// The assembled query/mutation surface.
///
/// Built once at startup; each inbound request is dispatched through the
/// registry as an independent, short-lived invocation. The only state shared
/// across invocations is the backing store behind the repositories.
pub struct App {
    registry: Registry,
}

impl App {
    pub fn new(
        products: Arc<ProductService>,
        customers: Arc<CustomerService>,
        invoices: Arc<InvoiceService>,
    ) -> Self {
        let mut registry = Registry::new();
        ops::products::register(&mut registry, products);
        ops::customers::register(&mut registry, customers);
        ops::invoices::register(&mut registry, invoices);
        Self { registry }
    }

    /// Dev/test host: everything wired against in-memory repositories.
    pub fn with_memory_store() -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::new(UuidGenerator);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let products = Arc::new(ProductService::new(
            Arc::new(MemoryRepository::<Product>::new(ids.clone(), clock.clone())),
            clock.clone(),
        ));
        let customers = Arc::new(CustomerService::new(
            Arc::new(MemoryRepository::<Customer>::new(ids.clone(), clock.clone())),
            clock.clone(),
        ));
        let invoices = Arc::new(InvoiceService::new(
            Arc::new(MemoryRepository::<Invoice>::new(ids, clock.clone())),
            clock,
        ));

        Self::new(products, customers, invoices)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
