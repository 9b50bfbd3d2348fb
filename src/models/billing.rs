// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pendente,
    Atrasado,
    Pago,
    Cancelado,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub client_id: Uuid,

    #[schema(example = "Honorários contábeis - Janeiro")]
    pub description: String,

    #[schema(example = "850.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-02-10")]
    pub due_date: NaiveDate,

    pub status: InvoiceStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_in_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pendente).unwrap(),
            "\"PENDENTE\""
        );
        assert_eq!(
            serde_json::from_str::<InvoiceStatus>("\"ATRASADO\"").unwrap(),
            InvoiceStatus::Atrasado
        );
    }
}
