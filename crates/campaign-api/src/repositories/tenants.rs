//! Tenants repository.

use super::observe;
use crate::errors::ApiError;
use crate::models::Tenant;
use sqlx::PgPool;
use std::time::Instant;
use tracing::instrument;

/// Tenants repository for database operations.
pub struct TenantsRepository;

impl TenantsRepository {
    /// List the tenants owned by `owner_id`, oldest first.
    #[instrument(skip(pool), name = "ca.repo.list_tenants_by_owner")]
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Tenant>, ApiError> {
        let start = Instant::now();

        let result = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM tenants
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await;

        observe("list_tenants_by_owner", start, result)
    }
}
