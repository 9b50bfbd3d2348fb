// src/handlers/reports.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{CanViewReports, RequireCapability},
    models::reports::ReportsSummary,
};

// GET /api/reports/summary
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses(
        (status = 200, description = "Resumo consolidado do escritório", body = ReportsSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanViewReports>,
) -> Result<Json<ReportsSummary>, AppError> {
    let summary = app_state.reports_repo.get_summary(&app_state.db_pool).await?;
    Ok(Json(summary))
}
