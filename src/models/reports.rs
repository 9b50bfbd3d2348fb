// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::client::TaxRegime;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsSummary {
    pub active_clients: i64,
    pub pending_invoices: i64,
    pub overdue_invoices: i64,

    // Soma de tudo que ainda não foi pago (PENDENTE + ATRASADO)
    #[schema(example = "12450.00")]
    pub outstanding_amount: Decimal,

    pub pending_tasks: i64,
    pub clients_by_regime: Vec<RegimeCount>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegimeCount {
    pub tax_regime: TaxRegime,
    pub total: i64,
}
