//! Users repository.

use super::observe;
use crate::errors::ApiError;
use crate::models::User;
use sqlx::PgPool;
use std::time::Instant;
use tracing::instrument;

/// Users repository for database operations.
pub struct UsersRepository;

impl UsersRepository {
    /// Fetch a user's public profile by id.
    ///
    /// Returns `None` if no such user exists.
    #[instrument(skip(pool), name = "ca.repo.get_user")]
    pub async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, ApiError> {
        let start = Instant::now();

        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await;

        observe("get_user", start, result)
    }
}
