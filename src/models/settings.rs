// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Configurações do escritório. Linha única (id = 1).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FirmSettings {
    #[schema(ignore)]
    pub id: i32,

    #[schema(example = "JZF Contabilidade")]
    pub firm_name: Option<String>,

    #[schema(example = "00.000.000/0001-00")]
    pub cnpj: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub address: Option<String>,

    #[schema(example = "chave@pix.com.br")]
    pub pix_key: Option<String>,

    #[schema(example = "https://pagamento.jzf.com.br")]
    pub payment_link: Option<String>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub firm_name: Option<String>,
    pub cnpj: Option<String>,
    pub address: Option<String>,
    pub pix_key: Option<String>,
    pub payment_link: Option<String>,
}
