use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::tag::{EntityKind, TagInput, TagRow};
use crate::state::AppState;
use crate::store;
use crate::tagging::reconcile::sync_entity_tags;

#[derive(Deserialize)]
pub struct TagSetRequest {
    pub tags: BTreeSet<String>,
}

/// GET /api/v1/tags
pub async fn handle_list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagRow>>, AppError> {
    Ok(Json(store::tags::list_tags(&state.db).await?))
}

/// POST /api/v1/tags
/// A duplicate name surfaces as 409 through the unique index.
pub async fn handle_create_tag(
    State(state): State<AppState>,
    Json(req): Json<TagInput>,
) -> Result<(StatusCode, Json<TagRow>), AppError> {
    let (name, color) = req.validate()?;
    let id = store::tags::insert_tag(&state.db, &name, &color).await?;
    info!("Created tag {id} '{name}'");
    Ok((StatusCode::CREATED, Json(TagRow { id, name, color })))
}

/// PUT /api/v1/tags/:id
pub async fn handle_update_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagInput>,
) -> Result<Json<TagRow>, AppError> {
    let (name, color) = req.validate()?;
    if store::tags::update_tag(&state.db, id, &name, &color).await? == 0 {
        return Err(AppError::NotFound(format!("Tag {id} not found")));
    }
    let tag = store::tags::get_tag(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {id} not found")))?;
    Ok(Json(tag))
}

/// DELETE /api/v1/tags/:id
/// Links to accounts and contacts go with it.
pub async fn handle_delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if store::tags::delete_tag(&state.db, id).await? == 0 {
        return Err(AppError::NotFound(format!("Tag {id} not found")));
    }
    info!("Deleted tag {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/accounts/:id/tags
pub async fn handle_set_account_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagSetRequest>,
) -> Result<Json<Vec<TagRow>>, AppError> {
    Ok(Json(
        sync_entity_tags(&state.db, EntityKind::Account, id, &req.tags).await?,
    ))
}

/// PUT /api/v1/contacts/:id/tags
pub async fn handle_set_contact_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagSetRequest>,
) -> Result<Json<Vec<TagRow>>, AppError> {
    Ok(Json(
        sync_entity_tags(&state.db, EntityKind::Contact, id, &req.tags).await?,
    ))
}
