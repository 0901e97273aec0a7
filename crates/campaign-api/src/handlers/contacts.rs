//! Contact handlers.

use crate::errors::ApiError;
use crate::models::Contact;
use crate::repositories::ContactsRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/contacts/user/:userId
#[instrument(skip_all, name = "ca.handlers.list_user_contacts")]
pub async fn list_user_contacts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = ContactsRepository::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(contacts))
}
