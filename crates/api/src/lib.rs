//! Query/mutation surface of the invoicing core.
//!
//! Operations are wired through an explicit registration table built at
//! startup (operation name → required permission → handler → serde-validated
//! input/output) rather than declared inline on resolver methods. The caller
//! — whatever transport hosts this process — is expected to have
//! authenticated the principal; this crate only checks permissions.

pub mod app;
pub mod context;
pub mod error;

pub use app::App;
pub use context::{Permission, Principal};
pub use error::{ApiError, ApiResult};
