// src/models/task.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pendente,
    EmAndamento,
    Concluida,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_recurrence", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskRecurrence {
    Nenhuma,
    Mensal,
    Trimestral,
    Anual,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub client_id: Uuid,

    #[schema(example = "Entrega DAS")]
    pub title: String,
    pub description: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2026-02-20")]
    pub due_date: Option<NaiveDate>,

    pub recurrence: TaskRecurrence,
    pub status: TaskStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conjunto nomeado de modelos de tarefa, aplicado na criação de clientes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplateSet {
    pub id: Uuid,
    #[schema(example = "Obrigações Simples Nacional")]
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub id: Uuid,
    pub set_id: Uuid,
    #[schema(example = "Apuração DAS")]
    pub title: String,
    pub description: Option<String>,
    pub recurrence: TaskRecurrence,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplateSetDetail {
    #[serde(flatten)]
    pub set: TaskTemplateSet,
    pub templates: Vec<TaskTemplate>,
}
