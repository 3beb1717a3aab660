use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::vehicles::handlers;
use crate::modules::supabase::DataClient;

/// Create routes for the vehicles feature (session required)
pub fn routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route(
            "/api/vehicles",
            get(handlers::list_vehicles).post(handlers::create_vehicle),
        )
        .route(
            "/api/vehicles/{id}",
            put(handlers::update_vehicle).delete(handlers::delete_vehicle),
        )
        .with_state(client)
}
