use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicer_core::{
    Clock, DomainError, DomainRecord, DomainResult, Filterable, IdGenerator, Listable, RecordMeta,
    RecordSeed, apply_lifecycle_defaults,
};

/// Domain record: Customer.
///
/// The customer number is assigned externally, once, and is excluded from the
/// patch surface; a general update call can never alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(flatten)]
    meta: RecordMeta,
    name: String,
    customer_number: String,
    contact_name: Option<String>,
    show_contact: bool,
    email: Option<String>,
    street: Option<String>,
    zip: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    notes: Option<String>,
}

/// Constructor input: business fields plus an optional identity seed.
///
/// An empty seed creates a new record; a populated seed rehydrates one from
/// storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerInit {
    pub seed: RecordSeed,
    pub name: String,
    pub customer_number: String,
    pub contact_name: Option<String>,
    pub show_contact: bool,
    pub email: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: a field present overwrites, a field absent is untouched.
///
/// `id`, `createdAt`, `updatedAt`, and `customerNumber` are not part of this
/// surface; supplying them at the wire boundary is rejected as a validation
/// failure (`deny_unknown_fields`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub show_contact: Option<bool>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

impl Customer {
    pub fn new(
        init: CustomerInit,
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
    ) -> DomainResult<Self> {
        let meta = apply_lifecycle_defaults(init.seed, ids, clock)?;
        Ok(Self {
            meta,
            name: init.name,
            customer_number: init.customer_number,
            contact_name: init.contact_name,
            show_contact: init.show_contact,
            email: init.email,
            street: init.street,
            zip: init.zip,
            city: init.city,
            state: init.state,
            country: init.country,
            notes: init.notes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customer_number(&self) -> &str {
        &self.customer_number
    }

    pub fn contact_name(&self) -> Option<&str> {
        self.contact_name.as_deref()
    }

    pub fn show_contact(&self) -> bool {
        self.show_contact
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Assign the externally issued customer number.
    ///
    /// Invariant: assignable once; rejected if a number is already present.
    pub fn assign_customer_number(&mut self, number: impl Into<String>) -> DomainResult<()> {
        if !self.customer_number.is_empty() {
            return Err(DomainError::invariant(
                "customer number is immutable once assigned",
            ));
        }
        let number = number.into();
        if number.trim().is_empty() {
            return Err(DomainError::validation("customer number must not be empty"));
        }
        self.customer_number = number;
        Ok(())
    }

    /// Merge a partial set of fields and rewrite `updated_at`, even when the
    /// patch changed no visible field.
    pub fn update(&mut self, patch: CustomerPatch, now: DateTime<Utc>) {
        let CustomerPatch {
            name,
            contact_name,
            show_contact,
            email,
            street,
            zip,
            city,
            state,
            country,
            notes,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = contact_name {
            self.contact_name = Some(v);
        }
        if let Some(v) = show_contact {
            self.show_contact = v;
        }
        if let Some(v) = email {
            self.email = Some(v);
        }
        if let Some(v) = street {
            self.street = Some(v);
        }
        if let Some(v) = zip {
            self.zip = Some(v);
        }
        if let Some(v) = city {
            self.city = Some(v);
        }
        if let Some(v) = state {
            self.state = Some(v);
        }
        if let Some(v) = country {
            self.country = Some(v);
        }
        if let Some(v) = notes {
            self.notes = Some(v);
        }

        self.touch(now);
    }

    /// Validation before persistence.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        Ok(())
    }
}

impl DomainRecord for Customer {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn with_meta(meta: RecordMeta) -> Self {
        Self {
            meta,
            name: String::new(),
            customer_number: String::new(),
            contact_name: None,
            show_contact: false,
            email: None,
            street: None,
            zip: None,
            city: None,
            state: None,
            country: None,
            notes: None,
        }
    }
}

impl Listable for Customer {
    fn search_text(&self) -> &str {
        &self.name
    }

    fn sort_key(&self) -> (&str, &str) {
        ("", &self.name)
    }
}

/// Structural `where` filter for customer listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerFilter {
    pub search: Option<String>,
}

impl Filterable for Customer {
    type Filter = CustomerFilter;

    fn matches(&self, filter: &Self::Filter) -> bool {
        match &filter.search {
            Some(term) if !term.is_empty() => self
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}
