// src/handlers/clients.rs

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
    db::client_repo::ClientRecord,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageClients, RequireCapability},
    },
    models::client::{Client, TaxRegime},
    services::client_service::NewClientCredentials,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Silva Comércio Ltda")]
    pub company: String,

    #[schema(example = "12345678000199")]
    pub cnpj: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "contato@silva.com.br")]
    pub email: String,

    #[schema(example = "(11) 99999-8888")]
    pub phone: String,

    pub tax_regime: TaxRegime,

    #[serde(default)]
    pub cnaes: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub business_description: Option<String>,
}

impl ClientPayload {
    fn into_record(self) -> ClientRecord {
        ClientRecord {
            name: self.name,
            company: self.company,
            cnpj: self.cnpj,
            email: self.email,
            phone: self.phone,
            tax_regime: self.tax_regime,
            cnaes: self.cnaes,
            keywords: self.keywords,
            business_description: self.business_description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub client: ClientPayload,

    // Login de autoatendimento (opcional)
    #[schema(example = "silva.comercio")]
    pub username: Option<String>,
    pub password: Option<String>,

    // Conjunto de tarefas recorrentes aplicado na criação (opcional)
    pub task_template_set_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[serde(flatten)]
    #[validate(nested)]
    pub client: ClientPayload,

    // Quando presente, redefine o conjunto de acesso do login principal
    pub selected_client_ids: Option<Vec<Uuid>>,

    // Quando presente, troca a senha do login principal
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub new_password: Option<String>,
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    responses(
        (status = 200, description = "Empresas visíveis para o usuário", body = [Client])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients = app_state.client_service.list_for(&session).await?;
    Ok(Json(clients))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    responses(
        (status = 200, description = "Dados da empresa", body = Client),
        (status = 403, description = "Sem acesso a esta empresa"),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let client = app_state.client_service.get_for(&session, client_id).await?;
    Ok(Json(client))
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Empresa cadastrada", body = Client),
        (status = 409, description = "CNPJ ou usuário já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let credentials = match (payload.username, payload.password) {
        (Some(username), Some(password)) => Some(NewClientCredentials { username, password }),
        _ => None,
    };

    let client = app_state
        .client_service
        .create_client(
            payload.client.into_record(),
            credentials,
            payload.task_template_set_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Client),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<Json<Client>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_service
        .update_client(
            client_id,
            payload.client.into_record(),
            payload.selected_client_ids,
            payload.new_password,
        )
        .await?;

    Ok(Json(client))
}

// POST /api/clients/{id}/inactivate
#[utoipa::path(
    post,
    path = "/api/clients/{id}/inactivate",
    tag = "Clients",
    responses(
        (status = 200, description = "Empresa inativada", body = Client),
        (status = 404, description = "Empresa não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn inactivate_client(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let client = app_state.client_service.inactivate(client_id).await?;
    Ok(Json(client))
}

// DELETE /api/clients/{id} (apenas empresas já inativadas)
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    responses(
        (status = 204, description = "Empresa removida"),
        (status = 409, description = "A empresa precisa ser inativada antes da exclusão")
    ),
    params(("id" = Uuid, Path, description = "ID da empresa")),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageClients>,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete_client(client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
