// src/db/settings_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::settings::{FirmSettings, UpdateSettingsRequest},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_settings<'e, E>(&self, executor: E) -> Result<FirmSettings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // A migration garante a linha id = 1; ainda assim tratamos o
        // "Not Found" como um registro vazio.
        let settings = sqlx::query_as::<_, FirmSettings>(
            "SELECT id, firm_name, cnpj, address, pix_key, payment_link, updated_at
             FROM firm_settings WHERE id = 1",
        )
        .fetch_optional(executor)
        .await?;

        match settings {
            Some(s) => Ok(s),
            None => Ok(FirmSettings {
                id: 1,
                firm_name: None,
                cnpj: None,
                address: None,
                pix_key: None,
                payment_link: None,
                updated_at: None,
            }),
        }
    }

    pub async fn update_settings<'e, E>(
        &self,
        executor: E,
        input: UpdateSettingsRequest,
    ) -> Result<FirmSettings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // UPSERT (Insert or Update)
        let settings = sqlx::query_as::<_, FirmSettings>(
            r#"
            INSERT INTO firm_settings (id, firm_name, cnpj, address, pix_key, payment_link, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                firm_name = EXCLUDED.firm_name,
                cnpj = EXCLUDED.cnpj,
                address = EXCLUDED.address,
                pix_key = EXCLUDED.pix_key,
                payment_link = EXCLUDED.payment_link,
                updated_at = NOW()
            RETURNING id, firm_name, cnpj, address, pix_key, payment_link, updated_at
            "#,
        )
        .bind(input.firm_name)
        .bind(input.cnpj)
        .bind(input.address)
        .bind(input.pix_key)
        .bind(input.payment_link)
        .fetch_one(executor)
        .await?;

        Ok(settings)
    }
}
