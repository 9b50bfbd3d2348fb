// src/handlers/tasks.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageTasks, RequireCapability},
    },
    models::task::{Task, TaskRecurrence, TaskStatus, TaskTemplateSetDetail},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub client_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Entrega do DAS")]
    pub title: String,

    pub description: Option<String>,

    #[schema(example = "2026-02-20")]
    pub due_date: Option<chrono::NaiveDate>,

    #[serde(default = "default_recurrence")]
    pub recurrence: TaskRecurrence,
}

fn default_recurrence() -> TaskRecurrence {
    TaskRecurrence::Nenhuma
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusPayload {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Apuração mensal do Simples")]
    pub title: String,

    pub description: Option<String>,

    #[serde(default = "default_recurrence")]
    pub recurrence: TaskRecurrence,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateSetPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Rotina Simples Nacional")]
    pub name: String,

    #[validate(nested)]
    pub templates: Vec<TemplatePayload>,
}

// POST /api/tasks
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada (usuários da empresa são notificados)", body = Task),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageTasks>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let task = app_state
        .task_service
        .create_task(
            payload.client_id,
            &payload.title,
            payload.description.as_deref(),
            payload.due_date,
            payload.recurrence,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

// GET /api/tasks
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Tarefas visíveis para o usuário", body = [Task])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = app_state.task_service.list_for(&session).await?;
    Ok(Json(tasks))
}

// PUT /api/tasks/{id}/status (concluir tarefa recorrente agenda a próxima)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/status",
    tag = "Tasks",
    request_body = UpdateTaskStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Task),
        (status = 404, description = "Tarefa não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    security(("api_jwt" = []))
)]
pub async fn update_task_status(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageTasks>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskStatusPayload>,
) -> Result<Json<Task>, AppError> {
    let task = app_state
        .task_service
        .update_status(task_id, payload.status)
        .await?;
    Ok(Json(task))
}

// DELETE /api/tasks/{id}
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    responses(
        (status = 204, description = "Tarefa removida"),
        (status = 404, description = "Tarefa não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da tarefa")),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageTasks>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.task_service.delete_task(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/task-template-sets
#[utoipa::path(
    post,
    path = "/api/task-template-sets",
    tag = "Tasks",
    request_body = CreateTemplateSetPayload,
    responses(
        (status = 201, description = "Conjunto de tarefas recorrentes criado", body = TaskTemplateSetDetail)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_template_set(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageTasks>,
    Json(payload): Json<CreateTemplateSetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let templates = payload
        .templates
        .into_iter()
        .map(|t| (t.title, t.description, t.recurrence))
        .collect();

    let detail = app_state
        .task_service
        .create_template_set(&payload.name, templates)
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/task-template-sets
#[utoipa::path(
    get,
    path = "/api/task-template-sets",
    tag = "Tasks",
    responses(
        (status = 200, description = "Conjuntos cadastrados", body = [TaskTemplateSetDetail])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_template_sets(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageTasks>,
) -> Result<Json<Vec<TaskTemplateSetDetail>>, AppError> {
    let sets = app_state.task_service.list_template_sets().await?;
    Ok(Json(sets))
}
