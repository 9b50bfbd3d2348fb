// src/handlers/users.rs
//
// Gestão de contas administrativas (requer can_manage_admins).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::user_repo::UserCapabilities,
    middleware::rbac::{CanManageAdmins, RequireCapability},
    models::auth::{User, UserRole},
};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CapabilitiesPayload {
    pub can_manage_clients: bool,
    pub can_manage_billing: bool,
    pub can_manage_tasks: bool,
    pub can_manage_admins: bool,
    pub can_manage_settings: bool,
    pub can_view_reports: bool,
    pub can_view_dashboard: bool,
}

impl From<CapabilitiesPayload> for UserCapabilities {
    fn from(p: CapabilitiesPayload) -> Self {
        UserCapabilities {
            can_manage_clients: p.can_manage_clients,
            can_manage_billing: p.can_manage_billing,
            can_manage_tasks: p.can_manage_tasks,
            can_manage_admins: p.can_manage_admins,
            can_manage_settings: p.can_manage_settings,
            can_view_reports: p.can_view_reports,
            can_view_dashboard: p.can_view_dashboard,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 3, message = "O usuário deve ter no mínimo 3 caracteres."))]
    #[schema(example = "joana.admin")]
    pub username: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Joana Pereira")]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "joana@jzf.com.br")]
    pub email: String,

    #[serde(default)]
    pub capabilities: CapabilitiesPayload,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: String,

    #[serde(default)]
    pub capabilities: CapabilitiesPayload,

    // Quando presente, a senha é trocada (novo hash).
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Administrador criado", body = User),
        (status = 409, description = "Nome de usuário já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageAdmins>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let password_hash = app_state.auth_service.hash_password(&payload.password).await?;
    let capabilities: UserCapabilities = payload.capabilities.into();

    let user = app_state
        .user_repo
        .create_user(
            &app_state.db_pool,
            &payload.username,
            &password_hash,
            &payload.name,
            &payload.email,
            UserRole::Admin,
            &capabilities,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Lista de contas", body = [User])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageAdmins>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list_all(&app_state.db_pool).await?;
    Ok(Json(users))
}

// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Conta atualizada", body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do usuário")),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageAdmins>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let capabilities: UserCapabilities = payload.capabilities.clone().into();

    let mut tx = app_state.db_pool.begin().await?;

    let user = app_state
        .user_repo
        .update_profile(&mut *tx, user_id, &payload.name, &payload.email, &capabilities)
        .await?;

    if let Some(password) = &payload.password {
        let hash = app_state.auth_service.hash_password(password).await?;
        app_state
            .user_repo
            .set_password(&mut *tx, user_id, &hash)
            .await?;
    }

    tx.commit().await?;

    Ok(Json(user))
}
