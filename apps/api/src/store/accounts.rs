use serde::Serialize;
use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use tracing::info;

use crate::models::account::{AccountRecord, AccountRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct CrmStats {
    pub total_accounts: i64,
    pub total_contacts: i64,
}

pub async fn list_accounts<'e>(
    db: impl SqliteExecutor<'e>,
) -> Result<Vec<AccountRow>, sqlx::Error> {
    sqlx::query_as::<_, AccountRow>(
        "SELECT id, name, status, notes, external_link, is_client FROM accounts ORDER BY name",
    )
    .fetch_all(db)
    .await
}

pub async fn get_account<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<AccountRow>, sqlx::Error> {
    sqlx::query_as::<_, AccountRow>(
        "SELECT id, name, status, notes, external_link, is_client FROM accounts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Inserts an account and returns its generated id.
pub async fn insert_account<'e>(
    db: impl SqliteExecutor<'e>,
    record: &AccountRecord,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO accounts (name, status, notes, external_link, is_client) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.name)
    .bind(record.status.label())
    .bind(&record.notes)
    .bind(&record.external_link)
    .bind(record.is_client)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Overwrites every mutable field. Returns the number of rows touched.
pub async fn update_account<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
    record: &AccountRecord,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE accounts SET name = ?, status = ?, notes = ?, external_link = ?, is_client = ? \
         WHERE id = ?",
    )
    .bind(&record.name)
    .bind(record.status.label())
    .bind(&record.notes)
    .bind(&record.external_link)
    .bind(record.is_client)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes an account and its contacts in one transaction. Tag links and
/// interactions of those contacts go with them through the foreign keys.
/// Returns `false` when no such account exists.
pub async fn delete_account(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let contacts = sqlx::query("DELETE FROM contacts WHERE account_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let accounts = sqlx::query("DELETE FROM accounts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if accounts == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    info!("Deleted account {id} and {contacts} contact(s)");
    Ok(true)
}

/// Raw status of every account, the input of the funnel view.
pub async fn account_statuses<'e>(
    db: impl SqliteExecutor<'e>,
) -> Result<Vec<Option<String>>, sqlx::Error> {
    sqlx::query_scalar("SELECT status FROM accounts ORDER BY id")
        .fetch_all(db)
        .await
}

pub async fn account_stats<'e>(db: impl SqliteExecutor<'e>) -> Result<CrmStats, sqlx::Error> {
    sqlx::query_as::<_, CrmStats>(
        "SELECT (SELECT COUNT(*) FROM accounts) AS total_accounts, \
                (SELECT COUNT(*) FROM contacts) AS total_contacts",
    )
    .fetch_one(db)
    .await
}
