use sqlx::SqliteExecutor;

use crate::models::interaction::{InteractionFact, InteractionRow, NewInteraction};

/// Interactions of one contact, newest first.
pub async fn list_interactions_for_contact<'e>(
    db: impl SqliteExecutor<'e>,
    contact_id: i64,
) -> Result<Vec<InteractionRow>, sqlx::Error> {
    sqlx::query_as::<_, InteractionRow>(
        "SELECT id, contact_id, interaction_date, interaction_type, notes \
         FROM interactions WHERE contact_id = ? \
         ORDER BY interaction_date DESC, id DESC",
    )
    .bind(contact_id)
    .fetch_all(db)
    .await
}

pub async fn insert_interaction<'e>(
    db: impl SqliteExecutor<'e>,
    contact_id: i64,
    interaction: &NewInteraction,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO interactions (contact_id, interaction_date, interaction_type, notes) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(contact_id)
    .bind(interaction.date)
    .bind(interaction.interaction_type.label())
    .bind(&interaction.notes)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_interaction<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<InteractionRow>, sqlx::Error> {
    sqlx::query_as::<_, InteractionRow>(
        "SELECT id, contact_id, interaction_date, interaction_type, notes \
         FROM interactions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Type and date of every interaction, the input of the activity reports.
pub async fn interaction_facts<'e>(
    db: impl SqliteExecutor<'e>,
) -> Result<Vec<InteractionFact>, sqlx::Error> {
    sqlx::query_as::<_, InteractionFact>(
        "SELECT interaction_type, interaction_date FROM interactions ORDER BY id",
    )
    .fetch_all(db)
    .await
}
