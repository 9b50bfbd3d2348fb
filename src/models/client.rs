// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tax_regime", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxRegime {
    SimplesNacional,
    LucroPresumido,
    LucroReal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "client_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    Ativo,
    Inativo,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub name: String, // Responsável pela empresa

    #[schema(example = "Silva Comércio Ltda")]
    pub company: String, // Razão social

    #[schema(example = "12345678000199")]
    pub cnpj: Option<String>,

    #[schema(example = "contato@silva.com.br")]
    pub email: String,

    #[schema(example = "(11) 99999-8888")]
    pub phone: String,

    pub tax_regime: TaxRegime,
    pub status: ClientStatus,

    // Perfil de negócio usado nos prompts de IA
    #[schema(example = json!(["6201-5/01"]))]
    pub cnaes: Vec<String>,
    #[schema(example = json!(["saas", "consultoria ti"]))]
    pub keywords: Vec<String>,
    pub business_description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
