use chrono::NaiveDate;
use sqlx::SqliteExecutor;

use crate::models::contact::{
    ContactAiContext, ContactOverviewRow, ContactRecord, ContactRow, ContactSummaryRow,
    DueCandidateRow,
};

const CONTACT_COLUMNS: &str = "id, first_name, last_name, role, email, external_profile, \
    prospecting_status, last_action_notes, next_action_date, next_action_notes, \
    last_interaction_date, account_id";

pub async fn list_contacts_for_account<'e>(
    db: impl SqliteExecutor<'e>,
    account_id: i64,
) -> Result<Vec<ContactSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ContactSummaryRow>(
        "SELECT id, first_name, last_name, role, email, prospecting_status \
         FROM contacts WHERE account_id = ? ORDER BY last_name, first_name, id",
    )
    .bind(account_id)
    .fetch_all(db)
    .await
}

pub async fn get_contact<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<ContactRow>, sqlx::Error> {
    let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?");
    sqlx::query_as::<_, ContactRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Inserts a contact under `account_id` and returns its generated id.
pub async fn insert_contact<'e>(
    db: impl SqliteExecutor<'e>,
    account_id: i64,
    record: &ContactRecord,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO contacts (first_name, last_name, role, email, external_profile, \
         prospecting_status, last_action_notes, next_action_date, next_action_notes, account_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.role)
    .bind(&record.email)
    .bind(&record.external_profile)
    .bind(record.prospecting_status.label())
    .bind(&record.last_action_notes)
    .bind(record.next_action_date)
    .bind(&record.next_action_notes)
    .bind(account_id)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Overwrites every user-editable field. The owning account and the
/// last-interaction date are left alone.
pub async fn update_contact<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
    record: &ContactRecord,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE contacts SET first_name = ?, last_name = ?, role = ?, email = ?, \
         external_profile = ?, prospecting_status = ?, last_action_notes = ?, \
         next_action_date = ?, next_action_notes = ? WHERE id = ?",
    )
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.role)
    .bind(&record.email)
    .bind(&record.external_profile)
    .bind(record.prospecting_status.label())
    .bind(&record.last_action_notes)
    .bind(record.next_action_date)
    .bind(&record.next_action_notes)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes a contact; its tag links and interactions cascade.
pub async fn delete_contact<'e>(db: impl SqliteExecutor<'e>, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Stamps the denormalized last-interaction date. Returns rows touched.
pub async fn set_last_interaction_date<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
    date: NaiveDate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE contacts SET last_interaction_date = ? WHERE id = ?")
        .bind(date)
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Contacts with any next-action date, in contact id order.
pub async fn due_candidate_rows<'e>(
    db: impl SqliteExecutor<'e>,
) -> Result<Vec<DueCandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, DueCandidateRow>(
        "SELECT c.id AS contact_id, c.first_name, c.last_name, a.name AS account_name, \
                c.next_action_notes, c.next_action_date \
         FROM contacts c JOIN accounts a ON c.account_id = a.id \
         WHERE c.next_action_date IS NOT NULL \
         ORDER BY c.id",
    )
    .fetch_all(db)
    .await
}

pub async fn contact_overview_rows<'e>(
    db: impl SqliteExecutor<'e>,
) -> Result<Vec<ContactOverviewRow>, sqlx::Error> {
    sqlx::query_as::<_, ContactOverviewRow>(
        "SELECT c.id, c.first_name, c.last_name, c.prospecting_status, c.next_action_date, \
                c.next_action_notes, c.last_interaction_date, c.email, c.external_profile, \
                a.name AS account_name \
         FROM contacts c JOIN accounts a ON c.account_id = a.id \
         ORDER BY c.last_name, c.first_name, c.id",
    )
    .fetch_all(db)
    .await
}

pub async fn contact_ai_context<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<ContactAiContext>, sqlx::Error> {
    sqlx::query_as::<_, ContactAiContext>(
        "SELECT c.first_name, c.last_name, c.role, c.last_action_notes, c.last_interaction_date, \
                c.next_action_notes, c.next_action_date, a.name AS account_name \
         FROM contacts c JOIN accounts a ON c.account_id = a.id \
         WHERE c.id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
