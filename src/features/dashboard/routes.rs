use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::modules::supabase::DataClient;

/// Create dashboard routes (session required)
pub fn routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route("/api/dashboard/chart", get(handlers::get_chart))
        .with_state(client)
}
