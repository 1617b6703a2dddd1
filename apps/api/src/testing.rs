//! Seed helpers shared by the store-backed tests.

use std::collections::BTreeSet;

use sqlx::SqlitePool;

use crate::models::account::AccountRecord;
use crate::models::contact::ContactRecord;
use crate::models::status::{AccountStatus, ContactStatus};
use crate::models::tag::{EntityKind, DEFAULT_TAG_COLOR};
use crate::store;

pub fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub async fn seed_account(pool: &SqlitePool, name: &str, status: AccountStatus) -> i64 {
    let record = AccountRecord {
        status,
        ..AccountRecord::new_prospect(name).unwrap()
    };
    store::accounts::insert_account(pool, &record).await.unwrap()
}

pub async fn seed_contact(pool: &SqlitePool, account_id: i64, first: &str, last: &str) -> i64 {
    let record = ContactRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: None,
        email: None,
        external_profile: None,
        prospecting_status: ContactStatus::ToContact,
        last_action_notes: None,
        next_action_date: None,
        next_action_notes: None,
    };
    store::contacts::insert_contact(pool, account_id, &record)
        .await
        .unwrap()
}

pub async fn seed_tag(pool: &SqlitePool, name: &str) -> i64 {
    store::tags::insert_tag(pool, name, DEFAULT_TAG_COLOR)
        .await
        .unwrap()
}

/// Names of the tags currently linked to an entity.
pub async fn linked_names(pool: &SqlitePool, kind: EntityKind, entity_id: i64) -> BTreeSet<String> {
    store::tags::tags_for_entity(pool, kind, entity_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
}
