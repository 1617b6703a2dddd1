//! Appends interactions and keeps the contact's last-interaction date in step.
//!
//! The contact's `last_interaction_date` is a snapshot of the most recently
//! *recorded* interaction, not the chronological maximum: recording a
//! backdated interaction moves it backwards.

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::interaction::{InteractionRow, NewInteraction};
use crate::store;

/// Inserts the interaction and stamps the parent contact in one transaction.
pub async fn record_interaction(
    pool: &SqlitePool,
    contact_id: i64,
    interaction: &NewInteraction,
) -> Result<InteractionRow, AppError> {
    let mut tx = pool.begin().await?;

    if store::contacts::set_last_interaction_date(&mut *tx, contact_id, interaction.date).await?
        == 0
    {
        return Err(AppError::NotFound(format!("Contact {contact_id} not found")));
    }
    let id = store::interactions::insert_interaction(&mut *tx, contact_id, interaction).await?;
    let row = store::interactions::get_interaction(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Interaction {id} vanished")))?;

    tx.commit().await?;

    info!(
        "Recorded {} interaction {id} for contact {contact_id} on {}",
        interaction.interaction_type.label(),
        interaction.date
    );
    Ok(row)
}

pub async fn list_interactions(
    pool: &SqlitePool,
    contact_id: i64,
) -> Result<Vec<InteractionRow>, AppError> {
    if store::contacts::get_contact(pool, contact_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Contact {contact_id} not found")));
    }
    Ok(store::interactions::list_interactions_for_contact(pool, contact_id).await?)
}
