use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::instansi::dtos::{InstansiFormDto, InstansiOptionDto, InstansiResponseDto};
use crate::features::instansi::services::InstansiService;
use crate::modules::supabase::DataClient;
use crate::shared::editor::{write_response, RecordEditor};
use crate::shared::types::{ApiResponse, Meta};

fn service(client: &Arc<dyn DataClient>, user: &AuthenticatedUser) -> InstansiService {
    InstansiService::new(client.scoped(&user.access_token))
}

fn listed(items: Vec<InstansiResponseDto>) -> Json<ApiResponse<Vec<InstansiResponseDto>>> {
    let total = items.len() as i64;
    Json(ApiResponse::success(Some(items), None, Some(Meta { total })))
}

/// List institutions
#[utoipa::path(
    get,
    path = "/api/instansi",
    responses(
        (status = 200, description = "Institutions ordered by name", body = ApiResponse<Vec<InstansiResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "instansi",
    security(("bearer_auth" = []))
)]
pub async fn list_instansi(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<Vec<InstansiResponseDto>>>> {
    let items = service(&client, &user).list().await?;
    Ok(listed(items))
}

/// Institution choices for the ASN form
#[utoipa::path(
    get,
    path = "/api/instansi/options",
    responses(
        (status = 200, description = "Institution options", body = ApiResponse<Vec<InstansiOptionDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "instansi",
    security(("bearer_auth" = []))
)]
pub async fn list_instansi_options(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<Vec<InstansiOptionDto>>>> {
    let options = service(&client, &user).options().await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

/// Create an institution
///
/// Responds with the re-fetched list.
#[utoipa::path(
    post,
    path = "/api/instansi",
    request_body = InstansiFormDto,
    responses(
        (status = 201, description = "Institution created", body = ApiResponse<Vec<InstansiResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "instansi",
    security(("bearer_auth" = []))
)]
pub async fn create_instansi(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppJson(form): AppJson<InstansiFormDto>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<InstansiResponseDto>>>)> {
    let mut editor = RecordEditor::new(service(&client, &user));
    editor.begin_create();
    let outcome = editor.submit(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(write_response(&editor.state().items, &outcome, "Instansi created")),
    ))
}

/// Update an institution
#[utoipa::path(
    put,
    path = "/api/instansi/{id}",
    params(("id" = Uuid, Path, description = "Instansi ID")),
    request_body = InstansiFormDto,
    responses(
        (status = 200, description = "Institution updated", body = ApiResponse<Vec<InstansiResponseDto>>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Institution not found")
    ),
    tag = "instansi",
    security(("bearer_auth" = []))
)]
pub async fn update_instansi(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(form): AppJson<InstansiFormDto>,
) -> Result<Json<ApiResponse<Vec<InstansiResponseDto>>>> {
    let mut editor = RecordEditor::new(service(&client, &user));
    editor.list().await?;

    let row = editor
        .state()
        .items
        .iter()
        .find(|i| i.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Instansi {} not found", id)))?;
    editor.begin_edit(row);
    let outcome = editor.submit(form).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "Instansi updated")))
}

/// Delete an institution
///
/// Fails with 409 while ASN records still reference it.
#[utoipa::path(
    delete,
    path = "/api/instansi/{id}",
    params(("id" = Uuid, Path, description = "Instansi ID")),
    responses(
        (status = 200, description = "Institution deleted", body = ApiResponse<Vec<InstansiResponseDto>>),
        (status = 409, description = "Institution is still referenced")
    ),
    tag = "instansi",
    security(("bearer_auth" = []))
)]
pub async fn delete_instansi(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Vec<InstansiResponseDto>>>> {
    let mut editor = RecordEditor::new(service(&client, &user));
    let outcome = editor.remove(id).await?;

    Ok(Json(write_response(&editor.state().items, &outcome, "Instansi deleted")))
}
