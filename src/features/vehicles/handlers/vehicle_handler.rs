use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::vehicles::dtos::{VehicleFormDto, VehicleResponseDto};
use crate::features::vehicles::services::VehicleService;
use crate::modules::supabase::DataClient;
use crate::shared::editor::{write_response, RecordEditor};
use crate::shared::types::{ApiResponse, Meta};

type VehicleList = Json<ApiResponse<Vec<VehicleResponseDto>>>;

fn editor(client: &Arc<dyn DataClient>, user: &AuthenticatedUser) -> RecordEditor<VehicleService> {
    RecordEditor::new(VehicleService::new(client.scoped(&user.access_token)))
}

fn listed(items: Vec<VehicleResponseDto>) -> VehicleList {
    let total = items.len() as i64;
    Json(ApiResponse::success(Some(items), None, Some(Meta { total })))
}

/// List vehicles with their caretaker, newest first
#[utoipa::path(
    get,
    path = "/api/vehicles",
    responses(
        (status = 200, description = "Vehicle list", body = ApiResponse<Vec<VehicleResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "vehicles",
    security(("bearer_auth" = []))
)]
pub async fn list_vehicles(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<VehicleList> {
    let items = VehicleService::new(client.scoped(&user.access_token))
        .list()
        .await?;
    Ok(listed(items))
}

/// Register a vehicle
#[utoipa::path(
    post,
    path = "/api/vehicles",
    request_body = VehicleFormDto,
    responses(
        (status = 201, description = "Vehicle created; body is the re-fetched list", body = ApiResponse<Vec<VehicleResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "ASN already has a vehicle assigned")
    ),
    tag = "vehicles",
    security(("bearer_auth" = []))
)]
pub async fn create_vehicle(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppJson(form): AppJson<VehicleFormDto>,
) -> Result<(StatusCode, VehicleList)> {
    let mut editor = editor(&client, &user);
    editor.begin_create();
    let outcome = editor.submit(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(write_response(&editor.state().items, &outcome, "Vehicle created")),
    ))
}

/// Update a vehicle
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    request_body = VehicleFormDto,
    responses(
        (status = 200, description = "Vehicle updated; body is the re-fetched list", body = ApiResponse<Vec<VehicleResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "ASN already has a vehicle assigned")
    ),
    tag = "vehicles",
    security(("bearer_auth" = []))
)]
pub async fn update_vehicle(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(form): AppJson<VehicleFormDto>,
) -> Result<VehicleList> {
    let mut editor = editor(&client, &user);
    editor.list().await?;

    let row = editor
        .state()
        .items
        .iter()
        .find(|v| v.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))?;
    editor.begin_edit(row);
    let outcome = editor.submit(form).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "Vehicle updated")))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted; body is the re-fetched list", body = ApiResponse<Vec<VehicleResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "vehicles",
    security(("bearer_auth" = []))
)]
pub async fn delete_vehicle(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<VehicleList> {
    let mut editor = editor(&client, &user);
    let outcome = editor.remove(id).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "Vehicle deleted")))
}
