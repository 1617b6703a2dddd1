use std::collections::BTreeSet;

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::account::AccountRecord;
use crate::models::contact::{AccountChoice, ContactDetail, ContactRecord};
use crate::models::tag::EntityKind;
use crate::store;
use crate::tagging::reconcile::reconcile_tags;

/// Creates a contact, optionally creating its account on the fly, and links
/// its tags. All of it commits or none of it does.
pub async fn create_contact(
    pool: &SqlitePool,
    account: &AccountChoice,
    record: &ContactRecord,
    tags: &BTreeSet<String>,
) -> Result<ContactDetail, AppError> {
    let mut tx = pool.begin().await?;

    let account_id = match account {
        AccountChoice::Existing(id) => {
            if !store::tags::entity_exists(&mut *tx, EntityKind::Account, *id).await? {
                return Err(AppError::NotFound(format!("Account {id} not found")));
            }
            *id
        }
        AccountChoice::New(name) => {
            let new_account = AccountRecord::new_prospect(name)?;
            let id = store::accounts::insert_account(&mut *tx, &new_account).await?;
            info!("Created account {id} '{name}' for new contact");
            id
        }
    };

    let id = store::contacts::insert_contact(&mut *tx, account_id, record).await?;
    let lookup = store::tags::tag_lookup(&mut *tx).await?;
    reconcile_tags(&mut tx, id, EntityKind::Contact, tags, &lookup).await?;
    tx.commit().await?;

    info!(
        "Created contact {id} '{} {}' under account {account_id}",
        record.first_name, record.last_name
    );
    contact_detail(pool, id).await
}

/// Full-replace save of a contact and its tag set.
pub async fn update_contact(
    pool: &SqlitePool,
    id: i64,
    record: &ContactRecord,
    tags: &BTreeSet<String>,
) -> Result<ContactDetail, AppError> {
    let mut tx = pool.begin().await?;
    if store::contacts::update_contact(&mut *tx, id, record).await? == 0 {
        return Err(AppError::NotFound(format!("Contact {id} not found")));
    }
    let lookup = store::tags::tag_lookup(&mut *tx).await?;
    reconcile_tags(&mut tx, id, EntityKind::Contact, tags, &lookup).await?;
    tx.commit().await?;

    info!("Updated contact {id}");
    contact_detail(pool, id).await
}

pub async fn delete_contact(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if store::contacts::delete_contact(pool, id).await? == 0 {
        return Err(AppError::NotFound(format!("Contact {id} not found")));
    }
    info!("Deleted contact {id}");
    Ok(())
}

pub async fn contact_detail(pool: &SqlitePool, id: i64) -> Result<ContactDetail, AppError> {
    let contact = store::contacts::get_contact(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Contact {id} not found")))?;
    let account_name = store::accounts::get_account(pool, contact.account_id)
        .await?
        .map(|a| a.name)
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Contact {id} references missing account {}",
                contact.account_id
            ))
        })?;
    let tags = store::tags::tags_for_entity(pool, EntityKind::Contact, id).await?;
    Ok(ContactDetail {
        contact,
        account_name,
        tags,
    })
}
