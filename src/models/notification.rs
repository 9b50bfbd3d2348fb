// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Lembrete: A fatura \"Honorários\" está pendente de pagamento.")]
    pub message: String,

    #[schema(example = "/cobranca")]
    pub link: Option<String>,

    pub read: bool,
    pub created_at: DateTime<Utc>,
}
