// src/handlers/insights.rs
//
// Consulta de CNPJ e geração de oportunidades / conformidade via IA.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    db::InsightKind,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageClients, RequireCapability},
    },
    models::insights::{CnpjPrefill, Insight},
};

// GET /api/registry/cnpj/{cnpj}
#[utoipa::path(
    get,
    path = "/api/registry/cnpj/{cnpj}",
    tag = "Insights",
    responses(
        (status = 200, description = "Dados cadastrais para pré-preenchimento", body = CnpjPrefill),
        (status = 400, description = "CNPJ inválido"),
        (status = 502, description = "Falha na consulta ao registro público")
    ),
    params(("cnpj" = String, Path, description = "CNPJ, com ou sem máscara")),
    security(("api_jwt" = []))
)]
pub async fn lookup_cnpj(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(cnpj): Path<String>,
) -> Result<Json<CnpjPrefill>, AppError> {
    let prefill = app_state.registry_service.lookup_cnpj(&cnpj).await?;
    Ok(Json(prefill))
}

// POST /api/clients/{id}/opportunities
#[utoipa::path(
    post,
    path = "/api/clients/{id}/opportunities",
    tag = "Insights",
    responses(
        (status = 200, description = "Oportunidades armazenadas após a consulta à IA", body = [Insight]),
        (status = 404, description = "Empresa não encontrada"),
        (status = 502, description = "Falha no serviço de IA")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn generate_opportunities(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let insights = app_state
        .insights_service
        .generate(InsightKind::Opportunity, client_id)
        .await?;
    Ok(Json(insights))
}

// GET /api/clients/{id}/opportunities
#[utoipa::path(
    get,
    path = "/api/clients/{id}/opportunities",
    tag = "Insights",
    responses(
        (status = 200, description = "Oportunidades armazenadas", body = [Insight]),
        (status = 403, description = "Sem acesso a esta empresa")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_opportunities(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Insight>>, AppError> {
    if !session.can_access_client(client_id) {
        return Err(AppError::AccessDenied(
            "Você não tem acesso a esta empresa.".to_string(),
        ));
    }

    let insights = app_state
        .insights_service
        .list(InsightKind::Opportunity, client_id)
        .await?;
    Ok(Json(insights))
}

// POST /api/clients/{id}/compliance
#[utoipa::path(
    post,
    path = "/api/clients/{id}/compliance",
    tag = "Insights",
    responses(
        (status = 200, description = "Achados de conformidade armazenados após a consulta à IA", body = [Insight]),
        (status = 404, description = "Empresa não encontrada"),
        (status = 502, description = "Falha no serviço de IA")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn generate_compliance(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let insights = app_state
        .insights_service
        .generate(InsightKind::Compliance, client_id)
        .await?;
    Ok(Json(insights))
}

// GET /api/clients/{id}/compliance
#[utoipa::path(
    get,
    path = "/api/clients/{id}/compliance",
    tag = "Insights",
    responses(
        (status = 200, description = "Achados de conformidade armazenados", body = [Insight]),
        (status = 403, description = "Sem acesso a esta empresa")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn list_compliance(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<Insight>>, AppError> {
    if !session.can_access_client(client_id) {
        return Err(AppError::AccessDenied(
            "Você não tem acesso a esta empresa.".to_string(),
        ));
    }

    let insights = app_state
        .insights_service
        .list(InsightKind::Compliance, client_id)
        .await?;
    Ok(Json(insights))
}
