//! Caller identity for permission checks at dispatch.
//!
//! Authentication (tokens, sessions) is the surrounding layer's job; by the
//! time a `Principal` reaches this crate it is assumed to be who it says it
//! is. Dispatch only verifies that it carries the operation's permission.

use std::collections::BTreeSet;

/// A named capability such as `products.write`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Permission(String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authenticated caller plus its granted permissions.
#[derive(Debug, Clone)]
pub struct Principal {
    subject: String,
    permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new(subject: impl Into<String>, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            subject: subject.into(),
            permissions: permissions.into_iter().map(|p| p.0).collect(),
        }
    }

    /// All-access principal for dev hosts and tests.
    pub fn system() -> Self {
        Self::new("system", [Permission::new("*")])
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn can(&self, permission: &Permission) -> bool {
        self.permissions.contains("*") || self.permissions.contains(permission.as_str())
    }
}
