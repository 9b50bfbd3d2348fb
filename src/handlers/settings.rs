// src/handlers/settings.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{CanManageSettings, RequireCapability},
    models::settings::{FirmSettings, UpdateSettingsRequest},
};

// GET /api/settings: qualquer usuário autenticado (o boleto depende disso)
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configurações do escritório", body = FirmSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
) -> Result<Json<FirmSettings>, AppError> {
    let settings = app_state.settings_repo.get_settings(&app_state.db_pool).await?;
    Ok(Json(settings))
}

// PUT /api/settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "Settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Configurações atualizadas", body = FirmSettings)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageSettings>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<FirmSettings>, AppError> {
    let updated = app_state
        .settings_repo
        .update_settings(&app_state.db_pool, payload)
        .await?;
    Ok(Json(updated))
}
