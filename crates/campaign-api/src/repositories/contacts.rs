//! Contacts repository.

use super::observe;
use crate::errors::ApiError;
use crate::models::Contact;
use sqlx::PgPool;
use std::time::Instant;
use tracing::instrument;

/// Contacts repository for database operations.
pub struct ContactsRepository;

impl ContactsRepository {
    /// List the contacts owned by `owner_id`, ordered by name.
    #[instrument(skip(pool), name = "ca.repo.list_contacts_by_owner")]
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Contact>, ApiError> {
        let start = Instant::now();

        let result = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, owner_id, name, phone, email, created_at
            FROM contacts
            WHERE owner_id = $1
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await;

        observe("list_contacts_by_owner", start, result)
    }
}
