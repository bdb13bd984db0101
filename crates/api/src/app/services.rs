//! Entity services: the fetch → mutate → compute → save choreography behind
//! every operation.
//!
//! Repositories and the clock are passed in explicitly at construction; there
//! is no ambient container. Each method is one synchronous invocation — the
//! only shared resource across overlapping invocations is the backing store,
//! and with no version token on records, two overlapping updates race and the
//! last save wins.

use std::sync::Arc;

use invoicer_core::{
    Clock, DomainError, DomainRecord, DomainResult, ListQuery, RecordId, Repository, shape_listing,
};
use invoicer_customers::{Customer, CustomerFilter, CustomerPatch};
use invoicer_invoicing::{Invoice, InvoiceFilter, InvoicePatch};
use invoicer_products::{Product, ProductFilter, ProductPatch};

type ProductRepo = Arc<dyn Repository<Product, Filter = ProductFilter>>;
type CustomerRepo = Arc<dyn Repository<Customer, Filter = CustomerFilter>>;
type InvoiceRepo = Arc<dyn Repository<Invoice, Filter = InvoiceFilter>>;

pub struct ProductService {
    repo: ProductRepo,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(repo: ProductRepo, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Repository results, search-filtered and sorted by (category, name).
    /// Skip/limit are applied by the repository, not re-applied here.
    pub fn list(
        &self,
        filter: Option<ProductFilter>,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> DomainResult<Vec<Product>> {
        let search = filter.as_ref().and_then(|f| f.search.clone());
        let data = self.repo.list_by_query(&ListQuery { filter, skip, limit })?;
        Ok(shape_listing(data, search.as_deref()))
    }

    pub fn get(&self, id: RecordId) -> DomainResult<Option<Product>> {
        self.repo.get_by_id(id)
    }

    pub fn create(&self, data: ProductPatch) -> DomainResult<Product> {
        let mut product = self.repo.create()?;
        product.update(data, self.clock.now());
        product.validate()?;
        self.repo.save(&product)?;
        tracing::debug!(id = %product.id(), "product created");
        Ok(product)
    }

    pub fn update(&self, id: RecordId, data: ProductPatch) -> DomainResult<Product> {
        let mut product = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        product.update(data, self.clock.now());
        // Failed validation performs no write.
        product.validate()?;
        self.repo.save(&product)?;
        Ok(product)
    }

    pub fn delete(&self, id: RecordId) -> DomainResult<Product> {
        let product = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        self.repo.delete(id)?;
        Ok(product)
    }
}

pub struct CustomerService {
    repo: CustomerRepo,
    clock: Arc<dyn Clock>,
}

impl CustomerService {
    pub fn new(repo: CustomerRepo, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn list(
        &self,
        filter: Option<CustomerFilter>,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> DomainResult<Vec<Customer>> {
        let search = filter.as_ref().and_then(|f| f.search.clone());
        let data = self.repo.list_by_query(&ListQuery { filter, skip, limit })?;
        Ok(shape_listing(data, search.as_deref()))
    }

    pub fn get(&self, id: RecordId) -> DomainResult<Option<Customer>> {
        self.repo.get_by_id(id)
    }

    /// The customer number is issued by the surrounding system and assigned
    /// exactly once here; it is absent from the patch surface thereafter.
    pub fn create(&self, customer_number: String, data: CustomerPatch) -> DomainResult<Customer> {
        let mut customer = self.repo.create()?;
        customer.assign_customer_number(customer_number)?;
        customer.update(data, self.clock.now());
        customer.validate()?;
        self.repo.save(&customer)?;
        tracing::debug!(id = %customer.id(), "customer created");
        Ok(customer)
    }

    pub fn update(&self, id: RecordId, data: CustomerPatch) -> DomainResult<Customer> {
        let mut customer = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        customer.update(data, self.clock.now());
        customer.validate()?;
        self.repo.save(&customer)?;
        Ok(customer)
    }

    pub fn delete(&self, id: RecordId) -> DomainResult<Customer> {
        let customer = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        self.repo.delete(id)?;
        Ok(customer)
    }
}

pub struct InvoiceService {
    repo: InvoiceRepo,
    clock: Arc<dyn Clock>,
}

impl InvoiceService {
    pub fn new(repo: InvoiceRepo, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn list(
        &self,
        filter: Option<InvoiceFilter>,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> DomainResult<Vec<Invoice>> {
        self.repo.list_by_query(&ListQuery { filter, skip, limit })
    }

    pub fn get(&self, id: RecordId) -> DomainResult<Option<Invoice>> {
        self.repo.get_by_id(id)
    }

    pub fn create(&self, data: InvoicePatch) -> DomainResult<Invoice> {
        let mut invoice = self.repo.create()?;
        invoice.update(data, self.clock.now());
        invoice.validate()?;
        self.repo.save(&invoice)?;
        tracing::debug!(id = %invoice.id(), "invoice created");
        Ok(invoice)
    }

    pub fn update(&self, id: RecordId, data: InvoicePatch) -> DomainResult<Invoice> {
        let mut invoice = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        invoice.update(data, self.clock.now());
        invoice.validate()?;
        self.repo.save(&invoice)?;
        Ok(invoice)
    }

    pub fn delete(&self, id: RecordId) -> DomainResult<Invoice> {
        let invoice = self.repo.get_by_id(id)?.ok_or(DomainError::NotFound)?;
        self.repo.delete(id)?;
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use invoicer_core::{FixedClock, IdGenerator, SequentialIdGenerator};
    use invoicer_store::MemoryRepository;

    fn test_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn product_service(clock: Arc<FixedClock>) -> ProductService {
        let ids = Arc::new(SequentialIdGenerator::new());
        ProductService::new(
            Arc::new(MemoryRepository::<Product>::new(ids, clock.clone())),
            clock,
        )
    }

    fn patch(category: &str, name: &str, price_cents: i64) -> ProductPatch {
        ProductPatch {
            category: Some(category.to_string()),
            name: Some(name.to_string()),
            price_cents: Some(price_cents),
            ..ProductPatch::default()
        }
    }

    #[test]
    fn create_then_get_round_trips() {
        let service = product_service(test_clock());
        let created = service.create(patch("tools", "Widget", 1000)).unwrap();
        let fetched = service.get(created.id()).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_with_empty_name_is_rejected_and_not_persisted() {
        let service = product_service(test_clock());
        let err = service
            .create(ProductPatch {
                category: Some("tools".to_string()),
                ..ProductPatch::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.list(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn update_on_missing_id_is_not_found_and_writes_nothing() {
        let service = product_service(test_clock());
        let ghost = SequentialIdGenerator::new().generate();
        let err = service.update(ghost, patch("tools", "X", 1)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
        assert!(service.list(None, None, None).unwrap().is_empty());
    }

    #[test]
    fn failed_update_validation_leaves_stored_record_unchanged() {
        let clock = test_clock();
        let service = product_service(clock.clone());
        let created = service.create(patch("tools", "Widget", 1000)).unwrap();

        clock.set(clock.now() + chrono::Duration::minutes(1));
        let err = service
            .update(
                created.id(),
                ProductPatch {
                    price_cents: Some(-5),
                    ..ProductPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = service.get(created.id()).unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[test]
    fn update_refreshes_updated_at_even_for_empty_patch() {
        let clock = test_clock();
        let service = product_service(clock.clone());
        let created = service.create(patch("tools", "Widget", 1000)).unwrap();

        let later = clock.now() + chrono::Duration::minutes(3);
        clock.set(later);
        let updated = service.update(created.id(), ProductPatch::default()).unwrap();

        assert_eq!(updated.updated_at(), later);
        assert_eq!(updated.name(), created.name());
        assert_eq!(updated.created_at(), created.created_at());
    }

    #[test]
    fn list_searches_and_sorts_category_then_name() {
        let service = product_service(test_clock());
        service.create(patch("B", "A Widget", 100)).unwrap();
        service.create(patch("A", "Z Widget", 100)).unwrap();
        service.create(patch("A", "Plain Gadget", 100)).unwrap();

        let filter = ProductFilter {
            category: None,
            search: Some("widget".to_string()),
        };
        let listed = service.list(Some(filter), None, None).unwrap();
        let names: Vec<&str> = listed.iter().map(|p| p.name()).collect();
        // Category precedence over name: ("A", "Z Widget") before ("B", "A Widget").
        assert_eq!(names, vec!["Z Widget", "A Widget"]);
    }

    #[test]
    fn delete_returns_the_removed_record_and_is_terminal() {
        let service = product_service(test_clock());
        let created = service.create(patch("tools", "Widget", 1000)).unwrap();

        let deleted = service.delete(created.id()).unwrap();
        assert_eq!(deleted.id(), created.id());
        assert!(service.get(created.id()).unwrap().is_none());

        let err = service.delete(created.id()).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn customer_create_assigns_number_once() {
        let clock = test_clock();
        let ids = Arc::new(SequentialIdGenerator::new());
        let service = CustomerService::new(
            Arc::new(MemoryRepository::<Customer>::new(ids, clock.clone())),
            clock,
        );

        let customer = service
            .create(
                "C-1001".to_string(),
                CustomerPatch {
                    name: Some("Acme".to_string()),
                    ..CustomerPatch::default()
                },
            )
            .unwrap();
        assert_eq!(customer.customer_number(), "C-1001");

        let updated = service
            .update(
                customer.id(),
                CustomerPatch {
                    name: Some("Acme AG".to_string()),
                    ..CustomerPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.customer_number(), "C-1001");
        assert_eq!(updated.name(), "Acme AG");
    }

    #[test]
    fn invoice_totals_follow_item_updates() {
        let clock = test_clock();
        let ids = Arc::new(SequentialIdGenerator::new());
        let service = InvoiceService::new(
            Arc::new(MemoryRepository::<Invoice>::new(ids, clock.clone())),
            clock,
        );

        let item = invoicer_invoicing::InvoiceItem {
            id: "1".to_string(),
            name: "Consulting".to_string(),
            description: String::new(),
            quantity: 1.0,
            price_cents: 1000,
            tax_percentage: 19.0,
        };
        let invoice = service
            .create(InvoicePatch {
                items: Some(vec![item]),
                ..InvoicePatch::default()
            })
            .unwrap();

        assert_eq!(invoice.subtotal_cents(), 1000);
        assert_eq!(invoice.tax_total_cents(), 190);
        assert_eq!(invoice.total_cents(), 1190);
    }
}
