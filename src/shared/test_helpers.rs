use crate::features::auth::model::AuthenticatedUser;
use crate::modules::supabase::InMemoryDataClient;
use crate::shared::constants::{TABLE_ASN, TABLE_INSTANSI, TABLE_VEHICLES};

use axum::{extract::Request, middleware::Next, response::Response, Router};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::json;
use uuid::Uuid;

pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

pub fn create_test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: Uuid::new_v4(),
        email: Some("admin@dinas.go.id".to_string()),
        access_token: TEST_ACCESS_TOKEN.to_string(),
    }
}

async fn inject_test_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_user());
    next.run(request).await
}

/// Stand-in for the session middleware on protected routers
pub fn with_authenticated_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_test_user_middleware))
}

pub fn seed_instansi(client: &InMemoryDataClient, name: &str) -> Uuid {
    client.seed_id(
        TABLE_INSTANSI,
        json!({"name": name, "description": format!("{} office", name)}),
    )
}

pub fn seed_asn(client: &InMemoryDataClient, instansi_id: Uuid) -> Uuid {
    let name: String = Name().fake();
    seed_named_asn(client, instansi_id, &name)
}

pub fn seed_named_asn(client: &InMemoryDataClient, instansi_id: Uuid, name: &str) -> Uuid {
    let nip: u64 = (100_000_000_000_000_000..999_999_999_999_999_999).fake();
    client.seed_id(
        TABLE_ASN,
        json!({
            "nip": nip.to_string(),
            "name": name,
            "position": "Staff",
            "instansi_id": instansi_id,
        }),
    )
}

pub fn seed_vehicle(client: &InMemoryDataClient, wheel_count: i32, asn_id: Option<Uuid>) -> Uuid {
    let number: u32 = (1000..9999).fake();
    let brand: String = CompanyName().fake();
    client.seed_id(
        TABLE_VEHICLES,
        json!({
            "nopol": format!("B {} DN", number),
            "wheel_count": wheel_count,
            "brand": brand,
            "type": if wheel_count == 2 { "Sepeda Motor" } else { "Sedan" },
            "year": 2020,
            "asn_id": asn_id,
        }),
    )
}
