// src/db/notification_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::notification::AppNotification};

const NOTIFICATION_COLUMNS: &str = "id, user_id, message, link, read, created_at";

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        message: &str,
        link: Option<&str>,
    ) -> Result<AppNotification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, AppNotification>(&format!(
            r#"
            INSERT INTO notifications (user_id, message, link)
            VALUES ($1, $2, $3)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(message)
        .bind(link)
        .fetch_one(executor)
        .await?;

        Ok(notification)
    }

    // Insere apenas se não houver notificação NÃO LIDA idêntica para o
    // usuário. É a deduplicação do job de lembretes: rodar a cada 8h não
    // pode empilhar o mesmo aviso. Retorna true se inseriu.
    pub async fn create_if_absent<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        message: &str,
        link: Option<&str>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, message, link)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM notifications
                WHERE user_id = $1 AND message = $2 AND read = FALSE
            )
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(link)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<AppNotification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notifications = sqlx::query_as::<_, AppNotification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 100
            "#
        ))
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(notifications)
    }

    // O filtro por user_id impede marcar notificação alheia.
    pub async fn mark_read<'e, E>(
        &self,
        executor: E,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<AppNotification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, AppNotification>(&format!(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotificationNotFound)?;

        Ok(notification)
    }

    pub async fn mark_all_read<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE user_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
