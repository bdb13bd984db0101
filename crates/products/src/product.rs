use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicer_core::{
    Clock, DomainError, DomainRecord, DomainResult, Filterable, IdGenerator, Listable, RecordMeta,
    RecordSeed, apply_lifecycle_defaults,
};

/// Domain record: Product.
///
/// Prices are stored in minor currency units (cents) to avoid floating-point
/// drift; the tax percentage is a rate in `0..=100` applied to the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    meta: RecordMeta,
    category: String,
    name: String,
    description: Option<String>,
    notes: Option<String>,
    unit: Option<String>,
    price_cents: i64,
    tax_percentage: f64,
}

/// Constructor input: business fields plus an optional identity seed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInit {
    pub seed: RecordSeed,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub unit: Option<String>,
    pub price_cents: i64,
    pub tax_percentage: f64,
}

/// Partial update: a field present overwrites, a field absent is untouched.
/// Identity/timestamp fields are not part of this surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ProductPatch {
    pub category: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub unit: Option<String>,
    pub price_cents: Option<i64>,
    pub tax_percentage: Option<f64>,
}

impl Product {
    pub fn new(init: ProductInit, ids: &dyn IdGenerator, clock: &dyn Clock) -> DomainResult<Self> {
        let meta = apply_lifecycle_defaults(init.seed, ids, clock)?;
        let product = Self {
            meta,
            category: init.category,
            name: init.name,
            description: init.description,
            notes: init.notes,
            unit: init.unit,
            price_cents: init.price_cents,
            tax_percentage: init.tax_percentage,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn tax_percentage(&self) -> f64 {
        self.tax_percentage
    }

    /// Merge a partial set of fields and rewrite `updated_at`, even when the
    /// patch changed no visible field.
    pub fn update(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        let ProductPatch {
            category,
            name,
            description,
            notes,
            unit,
            price_cents,
            tax_percentage,
        } = patch;

        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = Some(v);
        }
        if let Some(v) = notes {
            self.notes = Some(v);
        }
        if let Some(v) = unit {
            self.unit = Some(v);
        }
        if let Some(v) = price_cents {
            self.price_cents = v;
        }
        if let Some(v) = tax_percentage {
            self.tax_percentage = v;
        }

        self.touch(now);
    }

    /// Validation before persistence: non-empty category/name, non-negative
    /// price, tax rate in `0..=100`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("product category must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if self.price_cents < 0 {
            return Err(DomainError::validation(format!(
                "price must not be negative (got {} cents)",
                self.price_cents
            )));
        }
        if !(0.0..=100.0).contains(&self.tax_percentage) {
            return Err(DomainError::validation(format!(
                "tax percentage must be within 0..=100 (got {})",
                self.tax_percentage
            )));
        }
        Ok(())
    }
}

impl DomainRecord for Product {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn with_meta(meta: RecordMeta) -> Self {
        Self {
            meta,
            category: String::new(),
            name: String::new(),
            description: None,
            notes: None,
            unit: None,
            price_cents: 0,
            tax_percentage: 0.0,
        }
    }
}

impl Listable for Product {
    fn search_text(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> (&str, &str) {
        (&self.category, &self.name)
    }
}

/// Structural `where` filter for product listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Filterable for Product {
    type Filter = ProductFilter;

    fn matches(&self, filter: &Self::Filter) -> bool {
        if let Some(category) = &filter.category {
            if &self.category != category {
                return false;
            }
        }
        if let Some(term) = &filter.search {
            if !term.is_empty()
                && !self.name.to_lowercase().contains(&term.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
