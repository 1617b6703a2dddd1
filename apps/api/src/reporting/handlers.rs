use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::reporting::activity::{TypeCount, WeeklyActivity};
use crate::reporting::due::DueAction;
use crate::reporting::funnel::FunnelStage;
use crate::reporting::overview::{OverviewEntry, OverviewFilter};
use crate::reporting::views;
use crate::state::AppState;
use crate::store::accounts::CrmStats;

/// Reference date for date-relative reports. Defaults to the server's local date.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceDate {
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

impl ReferenceDate {
    fn resolve(&self) -> NaiveDate {
        self.on.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// GET /api/v1/reports/funnel
pub async fn handle_funnel(State(state): State<AppState>) -> Json<Vec<FunnelStage>> {
    Json(views::funnel(&state.db).await)
}

/// GET /api/v1/reports/interaction-types
pub async fn handle_interaction_types(State(state): State<AppState>) -> Json<Vec<TypeCount>> {
    Json(views::interaction_distribution(&state.db).await)
}

/// GET /api/v1/reports/weekly-activity
pub async fn handle_weekly_activity(State(state): State<AppState>) -> Json<Vec<WeeklyActivity>> {
    Json(views::weekly_activity(&state.db).await)
}

/// GET /api/v1/reports/due-actions?on=YYYY-MM-DD
pub async fn handle_due_actions(
    State(state): State<AppState>,
    Query(params): Query<ReferenceDate>,
) -> Json<Vec<DueAction>> {
    Json(views::due_actions(&state.db, params.resolve()).await)
}

/// GET /api/v1/reports/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<CrmStats> {
    Json(views::stats(&state.db).await)
}

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

/// GET /api/v1/contacts/overview?search=&account=&status=&on=
pub async fn handle_contact_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewQuery>,
) -> Json<Vec<OverviewEntry>> {
    let reference = ReferenceDate { on: params.on }.resolve();
    let filter = OverviewFilter {
        search: params.search,
        account: params.account,
        status: params.status,
    };
    Json(views::contact_overview(&state.db, &state.overview_cache, &filter, reference).await)
}
