//! Template handlers.

use crate::errors::ApiError;
use crate::models::{AuthContext, Template, TemplateListResponse};
use crate::repositories::TemplatesRepository;
use crate::routes::AppState;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handler for GET /api/templates
///
/// Behind the Optional-Auth Gate. Anonymous callers see public templates;
/// callers with a session also see their own private ones.
#[instrument(skip_all, name = "ca.handlers.list_templates")]
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<AuthContext>,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let templates = TemplatesRepository::list_visible(&state.pool, viewer.user_id).await?;

    Ok(Json(TemplateListResponse { viewer, templates }))
}

/// Handler for GET /api/templates/user/:userId
#[instrument(skip_all, name = "ca.handlers.list_user_templates")]
pub async fn list_user_templates(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let templates = TemplatesRepository::list_by_owner(&state.pool, user_id).await?;
    Ok(Json(templates))
}
