//! Templates repository.
//!
//! Templates are either public (visible to everyone) or private to their
//! owner.

use super::observe;
use crate::errors::ApiError;
use crate::models::Template;
use sqlx::PgPool;
use std::time::Instant;
use tracing::instrument;

/// Upper bound on rows returned by a single listing.
pub const MAX_TEMPLATES_PER_PAGE: i64 = 200;

/// Templates repository for database operations.
pub struct TemplatesRepository;

impl TemplatesRepository {
    /// List templates visible to `viewer`: every public template plus, when a
    /// viewer is given, the viewer's own private ones. Newest first.
    #[instrument(skip(pool), name = "ca.repo.list_visible_templates")]
    pub async fn list_visible(
        pool: &PgPool,
        viewer: Option<i64>,
    ) -> Result<Vec<Template>, ApiError> {
        let start = Instant::now();

        let result = sqlx::query_as::<_, Template>(
            r#"
            SELECT id, owner_id, name, body, is_public, created_at
            FROM templates
            WHERE is_public = TRUE
               OR ($1::BIGINT IS NOT NULL AND owner_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(viewer)
        .bind(MAX_TEMPLATES_PER_PAGE)
        .fetch_all(pool)
        .await;

        observe("list_visible_templates", start, result)
    }

    /// List every template owned by `owner_id`, public or not. Newest first.
    #[instrument(skip(pool), name = "ca.repo.list_templates_by_owner")]
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Template>, ApiError> {
        let start = Instant::now();

        let result = sqlx::query_as::<_, Template>(
            r#"
            SELECT id, owner_id, name, body, is_public, created_at
            FROM templates
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(MAX_TEMPLATES_PER_PAGE)
        .fetch_all(pool)
        .await;

        observe("list_templates_by_owner", start, result)
    }
}
