use crate::features::auth::handlers;
use crate::modules::supabase::DataClient;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/navigation", get(handlers::check_navigation))
        .with_state(client)
}

/// Protected auth routes (require a live session)
pub fn protected_routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route("/api/auth/session", get(handlers::get_session))
        .route("/api/auth/logout", post(handlers::logout))
        .with_state(client)
}
