// src/services/notification_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{NotificationRepository, UserRepository},
};

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl NotificationService {
    pub fn new(
        notification_repo: NotificationRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
            pool,
        }
    }

    // Fan-out: uma notificação para CADA usuário cujo conjunto de acesso
    // inclui a empresa dona do registro.
    pub async fn notify_client_users(
        &self,
        client_id: Uuid,
        message: &str,
        link: Option<&str>,
    ) -> Result<usize, AppError> {
        let user_ids = self
            .user_repo
            .users_with_access_to(&self.pool, client_id)
            .await?;

        for user_id in &user_ids {
            self.notification_repo
                .create(&self.pool, *user_id, message, link)
                .await?;
        }

        Ok(user_ids.len())
    }

    // Variante usada pelo job de lembretes: não repete avisos não lidos.
    pub async fn remind_client_users(
        &self,
        client_id: Uuid,
        message: &str,
        link: Option<&str>,
    ) -> Result<usize, AppError> {
        let user_ids = self
            .user_repo
            .users_with_access_to(&self.pool, client_id)
            .await?;

        let mut inserted = 0;
        for user_id in user_ids {
            if self
                .notification_repo
                .create_if_absent(&self.pool, user_id, message, link)
                .await?
            {
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}
