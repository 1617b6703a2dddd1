pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::records::handlers as records;
use crate::reporting::handlers as reports;
use crate::state::AppState;
use crate::tagging::handlers as tagging;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route(
            "/api/v1/accounts",
            get(records::handle_list_accounts).post(records::handle_create_account),
        )
        .route(
            "/api/v1/accounts/:id",
            get(records::handle_get_account)
                .put(records::handle_update_account)
                .delete(records::handle_delete_account),
        )
        .route(
            "/api/v1/accounts/:id/contacts",
            get(records::handle_list_account_contacts),
        )
        .route(
            "/api/v1/accounts/:id/tags",
            put(tagging::handle_set_account_tags),
        )
        // Contacts
        .route("/api/v1/contacts", post(records::handle_create_contact))
        .route(
            "/api/v1/contacts/overview",
            get(reports::handle_contact_overview),
        )
        .route(
            "/api/v1/contacts/:id",
            get(records::handle_get_contact)
                .put(records::handle_update_contact)
                .delete(records::handle_delete_contact),
        )
        .route(
            "/api/v1/contacts/:id/interactions",
            get(records::handle_list_interactions).post(records::handle_record_interaction),
        )
        .route(
            "/api/v1/contacts/:id/tags",
            put(tagging::handle_set_contact_tags),
        )
        // Tag catalog
        .route(
            "/api/v1/tags",
            get(tagging::handle_list_tags).post(tagging::handle_create_tag),
        )
        .route(
            "/api/v1/tags/:id",
            put(tagging::handle_update_tag).delete(tagging::handle_delete_tag),
        )
        // Reports
        .route("/api/v1/reports/funnel", get(reports::handle_funnel))
        .route(
            "/api/v1/reports/interaction-types",
            get(reports::handle_interaction_types),
        )
        .route(
            "/api/v1/reports/weekly-activity",
            get(reports::handle_weekly_activity),
        )
        .route("/api/v1/reports/due-actions", get(reports::handle_due_actions))
        .route("/api/v1/reports/stats", get(reports::handle_stats))
        // Assistant
        .route("/api/v1/assistant", post(assistant::handle_ask))
        .with_state(state)
}
