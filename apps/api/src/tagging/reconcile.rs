//! Converges the stored tag links of one account or contact to a desired set
//! of tag names.
//!
//! The update is a full replace: every existing link of the entity is deleted,
//! then one link per resolved tag is inserted. Callers run it inside a
//! transaction so a failure between the two steps leaves the previous links in
//! place.

use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::errors::AppError;
use crate::models::tag::{EntityKind, TagLookup, TagRow};
use crate::store;

/// Maps desired tag names to ids. Names are trimmed the way tag names are
/// when created. Names missing from the lookup (renamed or deleted since the
/// form was rendered) are dropped.
pub fn resolve_tag_ids(desired: &BTreeSet<String>, lookup: &TagLookup) -> BTreeSet<i64> {
    desired
        .iter()
        .filter_map(|name| {
            let id = lookup.get(name.trim()).copied();
            if id.is_none() {
                debug!("Ignoring unknown tag '{name}'");
            }
            id
        })
        .collect()
}

/// Replaces the tag links of `entity_id` with the tags resolved from
/// `desired`. Returns the ids now linked.
pub async fn reconcile_tags(
    conn: &mut SqliteConnection,
    entity_id: i64,
    kind: EntityKind,
    desired: &BTreeSet<String>,
    lookup: &TagLookup,
) -> Result<BTreeSet<i64>, sqlx::Error> {
    let tag_ids = resolve_tag_ids(desired, lookup);

    let removed = store::tags::clear_entity_links(&mut *conn, kind, entity_id).await?;
    for tag_id in &tag_ids {
        store::tags::insert_entity_link(&mut *conn, kind, entity_id, *tag_id).await?;
    }

    debug!(
        "{} {entity_id}: replaced {removed} tag link(s) with {}",
        kind.label(),
        tag_ids.len()
    );
    Ok(tag_ids)
}

/// Standalone tag save for an existing entity: loads the catalog and
/// reconciles in one transaction, then returns the entity's tags.
pub async fn sync_entity_tags(
    pool: &SqlitePool,
    kind: EntityKind,
    entity_id: i64,
    desired: &BTreeSet<String>,
) -> Result<Vec<TagRow>, AppError> {
    let mut tx = pool.begin().await?;

    if !store::tags::entity_exists(&mut *tx, kind, entity_id).await? {
        return Err(AppError::NotFound(format!(
            "{} {entity_id} not found",
            kind.label()
        )));
    }

    let lookup = store::tags::tag_lookup(&mut *tx).await?;
    reconcile_tags(&mut tx, entity_id, kind, desired, &lookup).await?;
    tx.commit().await?;

    Ok(store::tags::tags_for_entity(pool, kind, entity_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::status::AccountStatus;
    use crate::testing::{linked_names, names, seed_account, seed_contact, seed_tag};

    async fn reconcile(pool: &SqlitePool, kind: EntityKind, id: i64, desired: &[&str]) {
        sync_entity_tags(pool, kind, id, &names(desired)).await.unwrap();
    }

    #[test]
    fn test_resolve_drops_unknown_names() {
        let lookup: TagLookup = [("Tech".to_string(), 1), ("VIP".to_string(), 2)].into();
        let ids = resolve_tag_ids(&names(&["Tech", "Ghost"]), &lookup);
        assert_eq!(ids, BTreeSet::from([1]));
    }

    #[test]
    fn test_resolve_trims_submitted_names() {
        let lookup: TagLookup = [("Tech".to_string(), 1)].into();
        let ids = resolve_tag_ids(&names(&[" Tech", "Tech "]), &lookup);
        assert_eq!(ids, BTreeSet::from([1]));
    }

    #[tokio::test]
    async fn test_padded_name_links_existing_tag() {
        let pool = test_pool().await;
        seed_tag(&pool, "Tech").await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;

        reconcile(&pool, EntityKind::Account, account, &["  Tech "]).await;
        assert_eq!(
            linked_names(&pool, EntityKind::Account, account).await,
            names(&["Tech"])
        );
    }

    #[tokio::test]
    async fn test_reconcile_is_set_equality_from_any_prior_state() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        for tag in ["A", "B", "C", "D"] {
            seed_tag(&pool, tag).await;
        }

        // empty prior state
        reconcile(&pool, EntityKind::Account, account, &["A", "B"]).await;
        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["A", "B"]));

        // disjoint prior state
        reconcile(&pool, EntityKind::Account, account, &["C", "D"]).await;
        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["C", "D"]));

        // superset prior state
        reconcile(&pool, EntityKind::Account, account, &["A", "B", "C", "D"]).await;
        reconcile(&pool, EntityKind::Account, account, &["B"]).await;
        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["B"]));
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        let contact = seed_contact(&pool, account, "Ada", "Lovelace").await;
        seed_tag(&pool, "Tech").await;
        seed_tag(&pool, "VIP").await;

        reconcile(&pool, EntityKind::Contact, contact, &["Tech", "VIP"]).await;
        let once = linked_names(&pool, EntityKind::Contact, contact).await;
        reconcile(&pool, EntityKind::Contact, contact, &["Tech", "VIP"]).await;
        let twice = linked_names(&pool, EntityKind::Contact, contact).await;

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_desired_set_clears_links() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        seed_tag(&pool, "Tech").await;
        reconcile(&pool, EntityKind::Account, account, &["Tech"]).await;

        let tags = sync_entity_tags(&pool, EntityKind::Account, account, &BTreeSet::new())
            .await
            .unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_names_are_dropped_silently() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        seed_tag(&pool, "Tech").await;

        reconcile(&pool, EntityKind::Account, account, &["Tech", "Deleted meanwhile"]).await;
        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["Tech"]));
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let pool = test_pool().await;
        let result = sync_entity_tags(&pool, EntityKind::Contact, 404, &names(&["Tech"])).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_reconcile_keeps_previous_links() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        seed_tag(&pool, "Tech").await;
        reconcile(&pool, EntityKind::Account, account, &["Tech"]).await;

        // A stale lookup pointing at a tag id that no longer exists makes the
        // insert step fail after the delete step already ran.
        let stale: TagLookup = [("Gone".to_string(), 9_999)].into();
        let mut tx = pool.begin().await.unwrap();
        let result =
            reconcile_tags(&mut tx, account, EntityKind::Account, &names(&["Gone"]), &stale).await;
        assert!(result.is_err());
        tx.rollback().await.unwrap();

        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["Tech"]));
    }

    #[tokio::test]
    async fn test_deleting_a_tag_removes_only_its_links() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        let contact = seed_contact(&pool, account, "Ada", "Lovelace").await;
        let tech = seed_tag(&pool, "Tech").await;
        seed_tag(&pool, "VIP").await;
        reconcile(&pool, EntityKind::Account, account, &["Tech", "VIP"]).await;
        reconcile(&pool, EntityKind::Contact, contact, &["Tech", "VIP"]).await;

        assert_eq!(store::tags::delete_tag(&pool, tech).await.unwrap(), 1);

        assert_eq!(linked_names(&pool, EntityKind::Account, account).await, names(&["VIP"]));
        assert_eq!(linked_names(&pool, EntityKind::Contact, contact).await, names(&["VIP"]));
    }

    #[tokio::test]
    async fn test_deleting_an_entity_removes_only_its_links() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        let first = seed_contact(&pool, account, "Ada", "Lovelace").await;
        let second = seed_contact(&pool, account, "Grace", "Hopper").await;
        seed_tag(&pool, "Tech").await;
        reconcile(&pool, EntityKind::Contact, first, &["Tech"]).await;
        reconcile(&pool, EntityKind::Contact, second, &["Tech"]).await;

        store::contacts::delete_contact(&pool, first).await.unwrap();

        let dangling: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM contact_tags WHERE contact_id = ?")
                .bind(first)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(dangling, 0);
        assert_eq!(linked_names(&pool, EntityKind::Contact, second).await, names(&["Tech"]));
        assert_eq!(store::tags::list_tags(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_shared_tags_between_contacts() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        let first = seed_contact(&pool, account, "Ada", "Lovelace").await;
        let second = seed_contact(&pool, account, "Grace", "Hopper").await;
        seed_tag(&pool, "Decision-maker").await;
        seed_tag(&pool, "Tech").await;

        reconcile(&pool, EntityKind::Contact, first, &["Decision-maker"]).await;
        reconcile(&pool, EntityKind::Contact, second, &[]).await;
        reconcile(&pool, EntityKind::Contact, second, &["Decision-maker", "Tech"]).await;

        assert_eq!(
            linked_names(&pool, EntityKind::Contact, first).await,
            names(&["Decision-maker"])
        );
        assert_eq!(
            linked_names(&pool, EntityKind::Contact, second).await,
            names(&["Decision-maker", "Tech"])
        );
    }
}
