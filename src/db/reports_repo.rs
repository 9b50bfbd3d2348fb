// src/db/reports_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::reports::{RegimeCount, ReportsSummary},
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral para a visão de relatórios.
    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<ReportsSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Transação para um snapshot consistente das contagens
        let mut tx = executor.begin().await?;

        let active_clients = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE status = 'ATIVO'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let pending_invoices = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invoices WHERE status = 'PENDENTE'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let overdue_invoices = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM invoices WHERE status = 'ATRASADO'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let outstanding_amount = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM invoices
            WHERE status IN ('PENDENTE', 'ATRASADO')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let pending_tasks = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE status = 'PENDENTE'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let clients_by_regime = sqlx::query_as::<_, RegimeCount>(
            r#"
            SELECT tax_regime, COUNT(*) AS total
            FROM clients
            WHERE status = 'ATIVO'
            GROUP BY tax_regime
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReportsSummary {
            active_clients,
            pending_invoices,
            overdue_invoices,
            outstanding_amount,
            pending_tasks,
            clients_by_regime,
        })
    }
}
