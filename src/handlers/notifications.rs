// src/handlers/notifications.rs
//
// Notificações in-app do próprio usuário autenticado.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
    models::notification::AppNotification,
};

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Notificações do usuário, mais recentes primeiro", body = [AppNotification])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<Json<Vec<AppNotification>>, AppError> {
    let notifications = app_state
        .notification_repo
        .list_by_user(&app_state.db_pool, session.user.id)
        .await?;
    Ok(Json(notifications))
}

// PUT /api/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    responses(
        (status = 200, description = "Notificação marcada como lida", body = AppNotification),
        (status = 404, description = "Notificação não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da notificação")),
    security(("api_jwt" = []))
)]
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<AppNotification>, AppError> {
    // Filtrado pelo dono: marcar notificação alheia devolve 404.
    let notification = app_state
        .notification_repo
        .mark_read(&app_state.db_pool, notification_id, session.user.id)
        .await?;
    Ok(Json(notification))
}

// PUT /api/notifications/read-all
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses(
        (status = 204, description = "Todas as notificações marcadas como lidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_all_notifications_read(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .notification_repo
        .mark_all_read(&app_state.db_pool, session.user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
