// src/db/billing_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{Invoice, InvoiceStatus},
};

const INVOICE_COLUMNS: &str =
    "id, client_id, description, amount, due_date, status, created_at, updated_at";

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        description: &str,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            INSERT INTO invoices (client_id, description, amount, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(description)
        .bind(amount)
        .bind(due_date)
        .fetch_one(executor)
        .await?;

        Ok(invoice)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(invoice_id)
        .fetch_optional(executor)
        .await?;
        Ok(invoice)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY due_date DESC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(invoices)
    }

    pub async fn list_by_clients<'e, E>(
        &self,
        executor: E,
        client_ids: &[Uuid],
    ) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE client_id = ANY($1) ORDER BY due_date DESC"
        ))
        .bind(client_ids)
        .fetch_all(executor)
        .await?;
        Ok(invoices)
    }

    // Faturas que ainda geram lembrete no job agendado.
    pub async fn list_pending<'e, E>(&self, executor: E) -> Result<Vec<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE status IN ('PENDENTE', 'ATRASADO')"
        ))
        .fetch_all(executor)
        .await?;
        Ok(invoices)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            r#"
            UPDATE invoices SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {INVOICE_COLUMNS}
            "#
        ))
        .bind(invoice_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::InvoiceNotFound)?;

        Ok(invoice)
    }

    // Promove PENDENTE vencida para ATRASADO. Retorna quantas mudaram.
    pub async fn mark_overdue<'e, E>(
        &self,
        executor: E,
        today: NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE invoices SET status = 'ATRASADO', updated_at = NOW()
            WHERE status = 'PENDENTE' AND due_date < $1
            "#,
        )
        .bind(today)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete<'e, E>(&self, executor: E, invoice_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(invoice_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvoiceNotFound);
        }
        Ok(())
    }
}
