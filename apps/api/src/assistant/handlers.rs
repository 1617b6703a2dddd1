use axum::{extract::State, Json};

use crate::assistant::{ask, AssistantRequest, AssistantResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/assistant
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, AppError> {
    let generator = state
        .assistant
        .as_deref()
        .ok_or(AppError::AssistantUnavailable)?;
    Ok(Json(ask(generator, &state.db, &req).await?))
}
