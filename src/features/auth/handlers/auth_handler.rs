use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::core::middleware::bearer_token;
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, MeResponseDto, NavigationQuery,
};
use crate::features::auth::gate::GateDecision;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::modules::supabase::DataClient;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(client): State<Arc<dyn DataClient>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()?;

    let auth_response = AuthService::new(client).login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// End the caller's session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<()>>> {
    AuthService::new(client.scoped(&user.access_token))
        .logout(&user)
        .await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Signed out".to_string()),
        None,
    )))
}

/// Get the user behind the current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    let me = AuthService::new(client).current_user(user);
    Ok(Json(ApiResponse::success(Some(me), None, None)))
}

/// Decide whether the UI may navigate to a page
///
/// The bearer token is optional; without one every protected page redirects
/// to the login page.
#[utoipa::path(
    get,
    path = "/api/auth/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation decision", body = ApiResponse<GateDecision>),
        (status = 404, description = "Unknown page")
    ),
    tag = "auth"
)]
pub async fn check_navigation(
    State(client): State<Arc<dyn DataClient>>,
    headers: HeaderMap,
    Query(query): Query<NavigationQuery>,
) -> Result<Json<ApiResponse<GateDecision>>> {
    let decision = AuthService::new(client)
        .navigation(&query.path, bearer_token(&headers))
        .await?;
    Ok(Json(ApiResponse::success(Some(decision), None, None)))
}
