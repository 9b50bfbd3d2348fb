// src/handlers/billing.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{CanManageBilling, RequireCapability},
    },
    models::billing::{Invoice, InvoiceStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub client_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Honorários contábeis - Janeiro/2026")]
    pub description: String,

    #[schema(example = 850.00)]
    pub amount: Decimal,

    #[schema(example = "2026-02-10")]
    pub due_date: chrono::NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceStatusPayload {
    pub status: InvoiceStatus,
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Billing",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura criada (usuários da empresa são notificados)", body = Invoice),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageBilling>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let invoice = app_state
        .billing_service
        .create_invoice(
            payload.client_id,
            &payload.description,
            payload.amount,
            payload.due_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Billing",
    responses(
        (status = 200, description = "Faturas visíveis para o usuário", body = [Invoice])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let invoices = app_state.billing_service.list_for(&session).await?;
    Ok(Json(invoices))
}

// PUT /api/invoices/{id}/status
#[utoipa::path(
    put,
    path = "/api/invoices/{id}/status",
    tag = "Billing",
    request_body = UpdateInvoiceStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da fatura")),
    security(("api_jwt" = []))
)]
pub async fn update_invoice_status(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageBilling>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<UpdateInvoiceStatusPayload>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = app_state
        .billing_service
        .update_status(invoice_id, payload.status)
        .await?;
    Ok(Json(invoice))
}

// DELETE /api/invoices/{id}
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    tag = "Billing",
    responses(
        (status = 204, description = "Fatura removida"),
        (status = 404, description = "Fatura não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da fatura")),
    security(("api_jwt" = []))
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    _guard: RequireCapability<CanManageBilling>,
    Path(invoice_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_invoice(invoice_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/invoices/{id}/boleto (PDF em memória)
#[utoipa::path(
    get,
    path = "/api/invoices/{id}/boleto",
    tag = "Billing",
    responses(
        (status = 200, description = "Boleto da fatura em PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 403, description = "Sem acesso a esta fatura"),
        (status = 404, description = "Fatura não encontrada")
    ),
    params(("id" = Uuid, Path, description = "ID da fatura")),
    security(("api_jwt" = []))
)]
pub async fn get_invoice_boleto(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(invoice_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    // O dono da fatura (ou qualquer admin) pode baixar o boleto.
    let invoice = app_state.billing_service.get_for(&session, invoice_id).await?;

    let pdf_bytes = app_state.boleto_service.generate_boleto_pdf(&invoice).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"boleto-{}.pdf\"", invoice.id),
        ),
    ];

    Ok((headers, pdf_bytes))
}
