use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::features::dashboard::view::DashboardView;
use crate::modules::supabase::DataClient;
use crate::shared::types::ApiResponse;

fn service(client: &Arc<dyn DataClient>, user: &AuthenticatedUser) -> DashboardService {
    DashboardService::new(client.scoped(&user.access_token))
}

/// Full dashboard: counts, recap table, assignment table and chart
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard snapshot", body = ApiResponse<DashboardSnapshotDto>),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Backend read failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<DashboardSnapshotDto>>, AppError> {
    let mut view = DashboardView::new(service(&client, &user));
    view.refresh().await?;
    Ok(Json(ApiResponse::success(
        Some(view.into_snapshot()),
        None,
        None,
    )))
}

/// Header card counts only
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>, AppError> {
    let summary = service(&client, &user).summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Vehicles and caretakers per institution
#[utoipa::path(
    get,
    path = "/api/dashboard/chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Chart series", body = ApiResponse<Vec<ChartPointDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_chart(
    user: AuthenticatedUser,
    State(client): State<Arc<dyn DataClient>>,
) -> Result<Json<ApiResponse<Vec<ChartPointDto>>>, AppError> {
    let chart = service(&client, &user).chart().await?;
    Ok(Json(ApiResponse::success(Some(chart), None, None)))
}
