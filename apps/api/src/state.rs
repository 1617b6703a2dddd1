use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::assistant::TextGenerator;
use crate::reporting::views::OverviewCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// None when no API key is configured; the assistant route then answers 503.
    pub assistant: Option<Arc<dyn TextGenerator>>,
    /// Contact overview rows, dropped on every write that can change them.
    pub overview_cache: Arc<OverviewCache>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        assistant: Option<Arc<dyn TextGenerator>>,
        overview_ttl: Duration,
    ) -> Self {
        AppState {
            db,
            assistant,
            overview_cache: Arc::new(OverviewCache::new(overview_ttl)),
        }
    }
}
