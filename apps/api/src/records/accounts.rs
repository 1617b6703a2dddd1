use std::collections::BTreeSet;

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::account::{AccountDetail, AccountRecord};
use crate::models::tag::EntityKind;
use crate::store;
use crate::tagging::reconcile::reconcile_tags;

/// Creates an account and links its tags atomically.
pub async fn create_account(
    pool: &SqlitePool,
    record: &AccountRecord,
    tags: &BTreeSet<String>,
) -> Result<AccountDetail, AppError> {
    let mut tx = pool.begin().await?;
    let id = store::accounts::insert_account(&mut *tx, record).await?;
    let lookup = store::tags::tag_lookup(&mut *tx).await?;
    reconcile_tags(&mut tx, id, EntityKind::Account, tags, &lookup).await?;
    tx.commit().await?;

    info!("Created account {id} '{}'", record.name);
    account_detail(pool, id).await
}

/// Full-replace save of an account and its tag set.
pub async fn update_account(
    pool: &SqlitePool,
    id: i64,
    record: &AccountRecord,
    tags: &BTreeSet<String>,
) -> Result<AccountDetail, AppError> {
    let mut tx = pool.begin().await?;
    if store::accounts::update_account(&mut *tx, id, record).await? == 0 {
        return Err(AppError::NotFound(format!("Account {id} not found")));
    }
    let lookup = store::tags::tag_lookup(&mut *tx).await?;
    reconcile_tags(&mut tx, id, EntityKind::Account, tags, &lookup).await?;
    tx.commit().await?;

    info!("Updated account {id}");
    account_detail(pool, id).await
}

pub async fn delete_account(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if !store::accounts::delete_account(pool, id).await? {
        return Err(AppError::NotFound(format!("Account {id} not found")));
    }
    Ok(())
}

pub async fn account_detail(pool: &SqlitePool, id: i64) -> Result<AccountDetail, AppError> {
    let account = store::accounts::get_account(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))?;
    let tags = store::tags::tags_for_entity(pool, EntityKind::Account, id).await?;
    let contacts = store::contacts::list_contacts_for_account(pool, id).await?;
    Ok(AccountDetail {
        account,
        tags,
        contacts,
    })
}
