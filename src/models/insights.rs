// src/models/insights.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Registro efêmero vindo da IA, deduplicado por (client_id, title, source).
// Oportunidades e achados de conformidade compartilham o mesmo formato.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: Uuid,
    pub client_id: Uuid,

    #[schema(example = "Crédito de PIS/COFINS sobre insumos")]
    pub title: String,
    pub description: Option<String>,

    #[schema(example = "Lei 10.637/2002")]
    pub source: String,

    pub created_at: DateTime<Utc>,
}

// Item cru retornado pelo serviço de IA, antes de persistir
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: String,
}

// Dados cadastrais públicos retornados pela consulta de CNPJ,
// já mapeados para o pré-preenchimento do formulário de cliente.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CnpjPrefill {
    #[schema(example = "12345678000199")]
    pub cnpj: String,
    pub name: String,
    pub company: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cnaes: Vec<String>,
}

// Resposta da API pública de CNPJ (formato BrasilAPI). Só desserializamos
// os campos que interessam ao pré-preenchimento.
#[derive(Debug, Deserialize)]
pub struct RegistryCompany {
    pub razao_social: String,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ddd_telefone_1: Option<String>,
    #[serde(default)]
    pub cnae_fiscal: Option<i64>,
    #[serde(default)]
    pub cnaes_secundarios: Vec<RegistrySecondaryCnae>,
    #[serde(default)]
    pub qsa: Vec<RegistryPartner>,
}

#[derive(Debug, Deserialize)]
pub struct RegistrySecondaryCnae {
    pub codigo: i64,
}

#[derive(Debug, Deserialize)]
pub struct RegistryPartner {
    pub nome_socio: String,
}
