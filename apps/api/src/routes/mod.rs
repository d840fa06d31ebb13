pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers;
use crate::session::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route("/api/v1/catalog", get(handlers::handle_catalog_info))
        .route("/api/v1/domains", get(handlers::handle_list_domains))
        .route("/api/v1/domains/:id", get(handlers::handle_get_domain))
        .route("/api/v1/roles/:title", get(handlers::handle_get_role))
        .route(
            "/api/v1/roles/:title/related",
            get(handlers::handle_related_roles),
        )
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/events",
            post(sessions::handle_session_event),
        )
        .with_state(state)
}
