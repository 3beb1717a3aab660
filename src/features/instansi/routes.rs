use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::instansi::handlers;
use crate::modules::supabase::DataClient;

/// Create routes for the instansi feature (session required)
pub fn routes(client: Arc<dyn DataClient>) -> Router {
    Router::new()
        .route(
            "/api/instansi",
            get(handlers::list_instansi).post(handlers::create_instansi),
        )
        .route("/api/instansi/options", get(handlers::list_instansi_options))
        .route(
            "/api/instansi/{id}",
            put(handlers::update_instansi).delete(handlers::delete_instansi),
        )
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::supabase::InMemoryDataClient;
    use crate::shared::test_helpers::{seed_asn, seed_instansi, with_authenticated_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(client: &InMemoryDataClient) -> TestServer {
        let app = with_authenticated_user(routes(Arc::new(client.clone())));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_create_responds_with_refetched_list() {
        let client = InMemoryDataClient::with_schema();
        seed_instansi(&client, "Badan Keuangan");
        let server = server(&client);

        let response = server
            .post("/api/instansi")
            .json(&json!({"name": "Dinas Perhubungan", "description": "Transport"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"][1]["name"], "Dinas Perhubungan");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let client = InMemoryDataClient::with_schema();
        let server = server(&client);

        server
            .put(&format!("/api/instansi/{}", uuid::Uuid::new_v4()))
            .json(&json!({"name": "X", "description": "Y"}))
            .await
            .assert_status_not_found();
        assert!(client.writes().is_empty());
    }

    #[tokio::test]
    async fn test_delete_referenced_instansi_is_conflict() {
        let client = InMemoryDataClient::with_schema();
        let instansi = seed_instansi(&client, "Dinas A");
        seed_asn(&client, instansi);
        let server = server(&client);

        let response = server
            .delete(&format!("/api/instansi/{}", instansi))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("violates foreign key constraint"));
        assert_eq!(client.rows("instansi").len(), 1);
    }

    #[tokio::test]
    async fn test_options_are_id_and_name() {
        let client = InMemoryDataClient::with_schema();
        let id = seed_instansi(&client, "Dinas A");
        let server = server(&client);

        let body: Value = server.get("/api/instansi/options").await.json();

        assert_eq!(body["data"], json!([{"id": id, "name": "Dinas A"}]));
    }
}
