// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, ClientStatus, TaxRegime},
};

const CLIENT_COLUMNS: &str = r#"
    id, name, company, cnpj, email, phone, tax_regime, status,
    cnaes, keywords, business_description, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

// Dados de escrita de um cliente (criação e edição compartilham o formato)
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub name: String,
    pub company: String,
    pub cnpj: Option<String>,
    pub email: String,
    pub phone: String,
    pub tax_regime: TaxRegime,
    pub cnaes: Vec<String>,
    pub keywords: Vec<String>,
    pub business_description: Option<String>,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, record: &ClientRecord) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            INSERT INTO clients (
                name, company, cnpj, email, phone, tax_regime,
                cnaes, keywords, business_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(&record.name)
        .bind(&record.company)
        .bind(&record.cnpj)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.tax_regime)
        .bind(&record.cnaes)
        .bind(&record.keywords)
        .bind(&record.business_description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "CNPJ '{}' já cadastrado.",
                        record.cnpj.as_deref().unwrap_or("?")
                    ));
                }
            }
            e.into()
        })?;

        Ok(client)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        record: &ClientRecord,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET
                name = $2, company = $3, cnpj = $4, email = $5, phone = $6,
                tax_regime = $7, cnaes = $8, keywords = $9,
                business_description = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(&record.name)
        .bind(&record.company)
        .bind(&record.cnpj)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.tax_regime)
        .bind(&record.cnaes)
        .bind(&record.keywords)
        .bind(&record.business_description)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ClientNotFound)?;

        Ok(client)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(client_id)
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY company ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(clients)
    }

    // Visão restrita: apenas as empresas do conjunto de acesso do usuário.
    pub async fn list_by_ids<'e, E>(
        &self,
        executor: E,
        ids: &[Uuid],
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ANY($1) ORDER BY company ASC"
        ))
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(clients)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        status: ClientStatus,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::ClientNotFound)?;

        Ok(client)
    }

    pub async fn delete<'e, E>(&self, executor: E, client_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }
}
