//! Tenant handlers.

use crate::errors::ApiError;
use crate::models::Tenant;
use crate::repositories::TenantsRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/tenants/owner/:id
#[instrument(skip_all, name = "ca.handlers.list_owner_tenants")]
pub async fn list_owner_tenants(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<i64>,
) -> Result<Json<Vec<Tenant>>, ApiError> {
    let tenants = TenantsRepository::list_by_owner(&state.pool, owner_id).await?;
    Ok(Json(tenants))
}
