//! Repository layer for the Campaign API.
//!
//! Read-only access to the tables created by `migrations/`, following the
//! Handler -> Repository layering. Queries are built at runtime with
//! `sqlx::query_as` and bound parameters.

pub mod contacts;
pub mod templates;
pub mod tenants;
pub mod users;

pub use contacts::ContactsRepository;
pub use templates::TemplatesRepository;
pub use tenants::TenantsRepository;
pub use users::UsersRepository;

use crate::errors::ApiError;
use crate::observability::metrics::record_db_query;
use std::time::Instant;

/// Record the outcome of a query started at `start` and convert its error.
fn observe<T>(
    operation: &'static str,
    start: Instant,
    result: Result<T, sqlx::Error>,
) -> Result<T, ApiError> {
    let status = if result.is_ok() { "success" } else { "error" };
    record_db_query(operation, status, start.elapsed());
    result.map_err(ApiError::from)
}
