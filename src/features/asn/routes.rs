use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::asn::handlers;
use crate::modules::supabase::DataClient;

/// Create routes for the ASN feature (session required)
pub fn routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route("/api/asn", get(handlers::list_asn).post(handlers::create_asn))
        .route("/api/asn/options", get(handlers::list_asn_options))
        .route(
            "/api/asn/{id}",
            put(handlers::update_asn).delete(handlers::delete_asn),
        )
        .with_state(client)
}
