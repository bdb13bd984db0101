//! Explicit operation registration table.
//!
//! Maps operation name → kind → required permission → handler. Handlers take
//! and return `serde_json::Value`; input validation is serde deserialization
//! into the operation's typed input shape.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::context::{Permission, Principal};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

type Handler = Box<dyn Fn(Value) -> ApiResult<Value> + Send + Sync>;

pub struct Operation {
    kind: OperationKind,
    permission: Permission,
    handler: Handler,
}

/// The operation table, built and wired once at startup.
#[derive(Default)]
pub struct Registry {
    operations: BTreeMap<String, Operation>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        kind: OperationKind,
        permission: Permission,
        handler: impl Fn(Value) -> ApiResult<Value> + Send + Sync + 'static,
    ) {
        self.operations.insert(
            name.into(),
            Operation {
                kind,
                permission,
                handler: Box::new(handler),
            },
        );
    }

    /// Run one operation for one principal.
    ///
    /// Permission is checked before the handler executes; an unauthorized
    /// call never reaches domain code.
    pub fn dispatch(&self, principal: &Principal, name: &str, input: Value) -> ApiResult<Value> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| ApiError::UnknownOperation(name.to_string()))?;

        if !principal.can(&operation.permission) {
            tracing::warn!(
                operation = name,
                subject = principal.subject(),
                "permission denied"
            );
            return Err(ApiError::Unauthorized);
        }

        let result = (operation.handler)(input);
        if operation.kind == OperationKind::Mutation {
            match &result {
                Ok(_) => tracing::info!(operation = name, subject = principal.subject(), "mutation applied"),
                Err(e) => tracing::warn!(
                    operation = name,
                    subject = principal.subject(),
                    error = %e,
                    "mutation failed"
                ),
            }
        }
        result
    }

    pub fn kind_of(&self, name: &str) -> Option<OperationKind> {
        self.operations.get(name).map(|op| op.kind)
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

/// Deserialize an operation input, reporting malformed shapes as validation
/// failures.
pub fn parse_input<T: serde::de::DeserializeOwned>(input: Value) -> ApiResult<T> {
    serde_json::from_value(input).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Serialize an operation output.
pub fn to_output<T: serde::Serialize>(output: &T) -> ApiResult<Value> {
    serde_json::to_value(output).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(
            "echo",
            OperationKind::Query,
            Permission::new("echo.read"),
            |input| Ok(input),
        );
        registry
    }

    #[test]
    fn dispatch_runs_registered_handler() {
        let registry = echo_registry();
        let out = registry
            .dispatch(&Principal::system(), "echo", serde_json::json!({"x": 1}))
            .unwrap();
        assert_eq!(out, serde_json::json!({"x": 1}));
    }

    #[test]
    fn unknown_operation_is_categorized() {
        let registry = echo_registry();
        let err = registry
            .dispatch(&Principal::system(), "nope", Value::Null)
            .unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_OPERATION");
    }

    #[test]
    fn missing_permission_blocks_before_the_handler() {
        let registry = echo_registry();
        let principal = Principal::new("mallory", []);
        let err = registry
            .dispatch(&principal, "echo", Value::Null)
            .unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }
}
