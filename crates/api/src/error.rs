//! API error taxonomy.
//!
//! Every failed operation reports exactly one categorized failure; there are
//! no partial-success results and no automatic retries.

use thiserror::Error;

use invoicer_core::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The operation targeted an id absent from storage (update/delete).
    #[error("not found")]
    NotFound,

    /// Malformed input shape or out-of-range field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The principal lacks the operation's required permission.
    #[error("unauthorized")]
    Unauthorized,

    /// No operation registered under this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Backend failure the caller cannot act on.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable category code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::UnknownOperation(_) => "UNKNOWN_OPERATION",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => ApiError::NotFound,
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::InvariantViolation(msg) => ApiError::Validation(msg),
            DomainError::InvalidId(msg) => ApiError::Validation(msg),
            DomainError::Unauthorized => ApiError::Unauthorized,
            DomainError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_single_categories() {
        assert_eq!(ApiError::from(DomainError::NotFound).code(), "NOT_FOUND");
        assert_eq!(
            ApiError::from(DomainError::validation("bad")).code(),
            "VALIDATION"
        );
        assert_eq!(
            ApiError::from(DomainError::invariant("violated")).code(),
            "VALIDATION"
        );
        assert_eq!(
            ApiError::from(DomainError::storage("down")).code(),
            "INTERNAL"
        );
    }
}
