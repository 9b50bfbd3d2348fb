// src/db/insights_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::insights::{Insight, InsightItem},
};

const INSIGHT_COLUMNS: &str = "id, client_id, title, description, source, created_at";

// As duas tabelas (oportunidades e conformidade) têm o mesmo formato;
// o enum escolhe o destino.
#[derive(Debug, Clone, Copy)]
pub enum InsightKind {
    Opportunity,
    Compliance,
}

impl InsightKind {
    fn table(self) -> &'static str {
        match self {
            InsightKind::Opportunity => "opportunities",
            InsightKind::Compliance => "compliance_findings",
        }
    }
}

#[derive(Clone)]
pub struct InsightsRepository {
    pool: PgPool,
}

impl InsightsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Dedup por (client_id, title, source): o UNIQUE da tabela + ON CONFLICT
    // descartam o que a IA repetir entre consultas.
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        kind: InsightKind,
        client_id: Uuid,
        item: &InsightItem,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {} (client_id, title, description, source)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (client_id, title, source) DO NOTHING
            "#,
            kind.table()
        ))
        .bind(client_id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.source)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_client<'e, E>(
        &self,
        executor: E,
        kind: InsightKind,
        client_id: Uuid,
    ) -> Result<Vec<Insight>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insights = sqlx::query_as::<_, Insight>(&format!(
            r#"
            SELECT {INSIGHT_COLUMNS}
            FROM {}
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
            kind.table()
        ))
        .bind(client_id)
        .fetch_all(executor)
        .await?;

        Ok(insights)
    }
}
