use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::account::{AccountDetail, AccountInput, AccountRow};
use crate::models::contact::{ContactDetail, ContactInput, ContactSummaryRow, NewContactRequest};
use crate::models::interaction::{InteractionRow, NewInteraction};
use crate::records::{accounts, contacts, interactions};
use crate::state::AppState;
use crate::store;

/// GET /api/v1/accounts
pub async fn handle_list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountRow>>, AppError> {
    Ok(Json(store::accounts::list_accounts(&state.db).await?))
}

/// POST /api/v1/accounts
pub async fn handle_create_account(
    State(state): State<AppState>,
    Json(req): Json<AccountInput>,
) -> Result<(StatusCode, Json<AccountDetail>), AppError> {
    let (record, tags) = req.validate()?;
    let detail = accounts::create_account(&state.db, &record, &tags).await?;
    state.overview_cache.invalidate().await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/accounts/:id
pub async fn handle_get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountDetail>, AppError> {
    Ok(Json(accounts::account_detail(&state.db, id).await?))
}

/// PUT /api/v1/accounts/:id
pub async fn handle_update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AccountInput>,
) -> Result<Json<AccountDetail>, AppError> {
    let (record, tags) = req.validate()?;
    let detail = accounts::update_account(&state.db, id, &record, &tags).await?;
    state.overview_cache.invalidate().await;
    Ok(Json(detail))
}

/// DELETE /api/v1/accounts/:id
/// Removes the account's contacts, their interactions and every tag link.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    accounts::delete_account(&state.db, id).await?;
    state.overview_cache.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/accounts/:id/contacts
pub async fn handle_list_account_contacts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ContactSummaryRow>>, AppError> {
    if store::accounts::get_account(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound(format!("Account {id} not found")));
    }
    Ok(Json(
        store::contacts::list_contacts_for_account(&state.db, id).await?,
    ))
}

/// POST /api/v1/contacts
pub async fn handle_create_contact(
    State(state): State<AppState>,
    Json(req): Json<NewContactRequest>,
) -> Result<(StatusCode, Json<ContactDetail>), AppError> {
    let account = req.account_choice()?;
    let (record, tags) = req.contact.validate()?;
    let detail = contacts::create_contact(&state.db, &account, &record, &tags).await?;
    state.overview_cache.invalidate().await;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/contacts/:id
pub async fn handle_get_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ContactDetail>, AppError> {
    Ok(Json(contacts::contact_detail(&state.db, id).await?))
}

/// PUT /api/v1/contacts/:id
pub async fn handle_update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ContactInput>,
) -> Result<Json<ContactDetail>, AppError> {
    let (record, tags) = req.validate()?;
    let detail = contacts::update_contact(&state.db, id, &record, &tags).await?;
    state.overview_cache.invalidate().await;
    Ok(Json(detail))
}

/// DELETE /api/v1/contacts/:id
pub async fn handle_delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    contacts::delete_contact(&state.db, id).await?;
    state.overview_cache.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/contacts/:id/interactions
pub async fn handle_list_interactions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<InteractionRow>>, AppError> {
    Ok(Json(interactions::list_interactions(&state.db, id).await?))
}

/// POST /api/v1/contacts/:id/interactions
pub async fn handle_record_interaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<NewInteraction>,
) -> Result<(StatusCode, Json<InteractionRow>), AppError> {
    let row = interactions::record_interaction(&state.db, id, &req.normalized()).await?;
    state.overview_cache.invalidate().await;
    Ok((StatusCode::CREATED, Json(row)))
}
