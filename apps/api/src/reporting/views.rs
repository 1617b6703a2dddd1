//! Store-backed report views. A failed fetch is logged and reported as an
//! empty view, so callers cannot tell "no data" from "store unavailable".

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::warn;

use crate::models::contact::ContactOverviewRow;
use crate::reporting::activity::{
    compute_interaction_distribution, compute_weekly_activity, TypeCount, WeeklyActivity,
};
use crate::reporting::cache::TtlCache;
use crate::reporting::due::{compute_due_actions, DueAction};
use crate::reporting::funnel::{compute_funnel, FunnelStage};
use crate::reporting::overview::{compute_overview, OverviewEntry, OverviewFilter};
use crate::store;
use crate::store::accounts::CrmStats;

pub type OverviewCache = TtlCache<Vec<ContactOverviewRow>>;

fn or_empty<T: Default>(result: Result<T, sqlx::Error>, view: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("{view} unavailable, returning empty result: {e}");
        T::default()
    })
}

pub async fn funnel(pool: &SqlitePool) -> Vec<FunnelStage> {
    let statuses = or_empty(store::accounts::account_statuses(pool).await, "Funnel view");
    compute_funnel(&statuses)
}

pub async fn interaction_distribution(pool: &SqlitePool) -> Vec<TypeCount> {
    let facts = or_empty(
        store::interactions::interaction_facts(pool).await,
        "Interaction distribution",
    );
    compute_interaction_distribution(&facts)
}

pub async fn weekly_activity(pool: &SqlitePool) -> Vec<WeeklyActivity> {
    let facts = or_empty(
        store::interactions::interaction_facts(pool).await,
        "Weekly activity",
    );
    compute_weekly_activity(&facts)
}

pub async fn due_actions(pool: &SqlitePool, reference: NaiveDate) -> Vec<DueAction> {
    let rows = or_empty(store::contacts::due_candidate_rows(pool).await, "Due actions");
    compute_due_actions(&rows, reference)
}

pub async fn stats(pool: &SqlitePool) -> CrmStats {
    or_empty(store::accounts::account_stats(pool).await, "Stats")
}

pub async fn contact_overview(
    pool: &SqlitePool,
    cache: &OverviewCache,
    filter: &OverviewFilter,
    reference: NaiveDate,
) -> Vec<OverviewEntry> {
    match cache
        .get_or_try_load(|| store::contacts::contact_overview_rows(pool))
        .await
    {
        Ok(rows) => compute_overview(&rows, filter, reference),
        Err(e) => {
            warn!("Contact overview unavailable, returning empty result: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::test_pool;
    use crate::models::status::AccountStatus;
    use crate::testing::{seed_account, seed_contact};

    #[tokio::test]
    async fn test_views_degrade_to_empty_when_store_is_closed() {
        let pool = test_pool().await;
        seed_account(&pool, "Acme", AccountStatus::Won).await;
        pool.close().await;

        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let cache = OverviewCache::new(Duration::from_secs(60));
        assert!(funnel(&pool).await.is_empty());
        assert!(interaction_distribution(&pool).await.is_empty());
        assert!(weekly_activity(&pool).await.is_empty());
        assert!(due_actions(&pool, today).await.is_empty());
        assert_eq!(stats(&pool).await, CrmStats::default());
        assert!(contact_overview(&pool, &cache, &OverviewFilter::default(), today)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_overview_served_from_cache_until_invalidated() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::Won).await;
        seed_contact(&pool, account, "Ada", "Lovelace").await;

        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let cache = OverviewCache::new(Duration::from_secs(600));
        let filter = OverviewFilter::default();
        assert_eq!(contact_overview(&pool, &cache, &filter, today).await.len(), 1);

        seed_contact(&pool, account, "Grace", "Hopper").await;
        assert_eq!(contact_overview(&pool, &cache, &filter, today).await.len(), 1);

        cache.invalidate().await;
        assert_eq!(contact_overview(&pool, &cache, &filter, today).await.len(), 2);
    }
}
