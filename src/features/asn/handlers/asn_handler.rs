use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::asn::dtos::{AsnFormDto, AsnOptionDto, AsnResponseDto};
use crate::features::asn::services::AsnService;
use crate::features::auth::model::AuthenticatedUser;
use crate::modules::supabase::DataClient;
use crate::shared::editor::{write_response, RecordEditor};
use crate::shared::types::{ApiResponse, Meta};

type AsnList = Json<ApiResponse<Vec<AsnResponseDto>>>;

fn editor(client: &Arc<dyn DataClient>, user: &AuthenticatedUser) -> RecordEditor<AsnService> {
    RecordEditor::new(AsnService::new(client.scoped(&user.access_token)))
}

/// List personnel with their institution, newest first
#[utoipa::path(
    get,
    path = "/api/asn",
    responses(
        (status = 200, description = "Personnel list", body = ApiResponse<Vec<AsnResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "asn",
    security(("bearer_auth" = []))
)]
pub async fn list_asn(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<AsnList> {
    let items = AsnService::new(client.scoped(&user.access_token))
        .list()
        .await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Personnel choices for the vehicle form
#[utoipa::path(
    get,
    path = "/api/asn/options",
    responses(
        (status = 200, description = "Personnel options", body = ApiResponse<Vec<AsnOptionDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "asn",
    security(("bearer_auth" = []))
)]
pub async fn list_asn_options(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<Vec<AsnOptionDto>>>> {
    let options = AsnService::new(client.scoped(&user.access_token))
        .options()
        .await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Create a personnel record
#[utoipa::path(
    post,
    path = "/api/asn",
    request_body = AsnFormDto,
    responses(
        (status = 201, description = "ASN created; body is the re-fetched list", body = ApiResponse<Vec<AsnResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Rejected by a backend constraint")
    ),
    tag = "asn",
    security(("bearer_auth" = []))
)]
pub async fn create_asn(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppJson(form): AppJson<AsnFormDto>,
) -> Result<(StatusCode, AsnList)> {
    let mut editor = editor(&client, &user);
    editor.begin_create();
    let outcome = editor.submit(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(write_response(&editor.state().items, &outcome, "ASN created")),
    ))
}

/// Update a personnel record
#[utoipa::path(
    put,
    path = "/api/asn/{id}",
    params(("id" = Uuid, Path, description = "ASN ID")),
    request_body = AsnFormDto,
    responses(
        (status = 200, description = "ASN updated; body is the re-fetched list", body = ApiResponse<Vec<AsnResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "ASN not found")
    ),
    tag = "asn",
    security(("bearer_auth" = []))
)]
pub async fn update_asn(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(form): AppJson<AsnFormDto>,
) -> Result<AsnList> {
    let mut editor = editor(&client, &user);
    editor.list().await?;

    let row = editor
        .state()
        .items
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("ASN {} not found", id)))?;
    editor.begin_edit(row);
    let outcome = editor.submit(form).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "ASN updated")))
}

/// Delete a personnel record
///
/// Fails with 409 while a vehicle is still assigned to it.
#[utoipa::path(
    delete,
    path = "/api/asn/{id}",
    params(("id" = Uuid, Path, description = "ASN ID")),
    responses(
        (status = 200, description = "ASN deleted; body is the re-fetched list", body = ApiResponse<Vec<AsnResponseDto>>),
        (status = 409, description = "ASN is still referenced")
    ),
    tag = "asn",
    security(("bearer_auth" = []))
)]
pub async fn delete_asn(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<AsnList> {
    let mut editor = editor(&client, &user);
    let outcome = editor.remove(id).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "ASN deleted")))
}
