//! User handlers.

use crate::auth::Claims;
use crate::errors::ApiError;
use crate::models::User;
use crate::repositories::UsersRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/users/me
///
/// Returns the verified claims of the caller, exactly as decoded:
///
/// ```json
/// { "userId": 42, "roleId": 2, "name": "Ada", "exp": 1234567890, "iat": 1234567800 }
/// ```
#[instrument(skip_all, name = "ca.handlers.me")]
pub async fn get_me(Extension(claims): Extension<Claims>) -> Json<Claims> {
    tracing::debug!(target: "ca.handlers.users", user_id = claims.user_id, "Returning caller claims");
    Json(claims)
}

/// Handler for GET /api/users/:userId
///
/// Guarded by the Auth and Ownership gates, so `user_id` is the caller's own.
#[instrument(skip_all, name = "ca.handlers.get_user")]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    UsersRepository::find_by_id(&state.pool, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}
