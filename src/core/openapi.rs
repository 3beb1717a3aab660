use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::asn::{dtos as asn_dtos, handlers as asn_handlers};
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::instansi::{dtos as instansi_dtos, handlers as instansi_handlers};
use crate::features::vehicles::{
    dtos as vehicles_dtos, handlers as vehicles_handlers, models as vehicles_models,
};
use crate::modules::supabase::SessionUser;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_session,
        auth::handlers::check_navigation,
        // Instansi
        instansi_handlers::list_instansi,
        instansi_handlers::list_instansi_options,
        instansi_handlers::create_instansi,
        instansi_handlers::update_instansi,
        instansi_handlers::delete_instansi,
        // ASN
        asn_handlers::list_asn,
        asn_handlers::list_asn_options,
        asn_handlers::create_asn,
        asn_handlers::update_asn,
        asn_handlers::delete_asn,
        // Vehicles
        vehicles_handlers::list_vehicles,
        vehicles_handlers::create_vehicle,
        vehicles_handlers::update_vehicle,
        vehicles_handlers::delete_vehicle,
        // Dashboard
        dashboard_handlers::get_dashboard,
        dashboard_handlers::get_summary,
        dashboard_handlers::get_chart,
    ),
    components(
        schemas(
            // Shared
            Meta,
            SessionUser,
            // Auth
            auth::gate::GateDecision,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            ApiResponse<auth::gate::GateDecision>,
            // Instansi
            instansi_dtos::InstansiFormDto,
            ApiResponse<Vec<instansi_dtos::InstansiResponseDto>>,
            ApiResponse<Vec<instansi_dtos::InstansiOptionDto>>,
            // ASN
            asn_dtos::AsnFormDto,
            ApiResponse<Vec<asn_dtos::AsnResponseDto>>,
            ApiResponse<Vec<asn_dtos::AsnOptionDto>>,
            // Vehicles
            vehicles_models::VehicleType,
            vehicles_dtos::VehicleFormDto,
            ApiResponse<Vec<vehicles_dtos::VehicleResponseDto>>,
            // Dashboard
            ApiResponse<dashboard_dtos::DashboardSnapshotDto>,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<Vec<dashboard_dtos::ChartPointDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Sign-in, session and route gating"),
        (name = "instansi", description = "Government institutions"),
        (name = "asn", description = "Civil servants assigned as vehicle caretakers"),
        (name = "vehicles", description = "Official vehicle registry"),
        (name = "Dashboard", description = "Fleet recap, assignments and per-institution chart"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Kendaraan Dinas API",
        version = "0.1.0",
        description = "API documentation for Kendaraan Dinas",
    )
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
