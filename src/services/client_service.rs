// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, TaskRepository, UserRepository},
    db::client_repo::ClientRecord,
    db::user_repo::UserCapabilities,
    models::auth::{SessionUser, UserRole},
    models::client::{Client, ClientStatus},
    services::auth::AuthService,
};

// Credenciais do login de autoatendimento criado junto com o cliente
#[derive(Debug, Clone)]
pub struct NewClientCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    user_repo: UserRepository,
    task_repo: TaskRepository,
    auth: AuthService,
    pool: PgPool,
}

impl ClientService {
    pub fn new(
        client_repo: ClientRepository,
        user_repo: UserRepository,
        task_repo: TaskRepository,
        auth: AuthService,
        pool: PgPool,
    ) -> Self {
        Self {
            client_repo,
            user_repo,
            task_repo,
            auth,
            pool,
        }
    }

    // Administradores listam tudo; usuários Cliente só o seu conjunto.
    pub async fn list_for(&self, session: &SessionUser) -> Result<Vec<Client>, AppError> {
        if session.is_admin() {
            self.client_repo.list_all(&self.pool).await
        } else {
            self.client_repo
                .list_by_ids(&self.pool, &session.client_ids)
                .await
        }
    }

    pub async fn get_for(
        &self,
        session: &SessionUser,
        client_id: Uuid,
    ) -> Result<Client, AppError> {
        if !session.can_access_client(client_id) {
            return Err(AppError::AccessDenied(
                "Você não tem acesso a esta empresa.".to_string(),
            ));
        }

        self.client_repo
            .find_by_id(&self.pool, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    // Cria o cliente e, opcionalmente, o login de autoatendimento e as
    // tarefas do conjunto recorrente escolhido. Tudo na mesma transação.
    pub async fn create_client(
        &self,
        record: ClientRecord,
        credentials: Option<NewClientCredentials>,
        task_template_set_id: Option<Uuid>,
    ) -> Result<Client, AppError> {
        // O hash fica fora da transação, pois não toca no banco.
        let password_hash = match &credentials {
            Some(c) => Some(self.auth.hash_password(&c.password).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let client = self.client_repo.create(&mut *tx, &record).await?;

        if let (Some(creds), Some(hash)) = (&credentials, &password_hash) {
            let user = self
                .user_repo
                .create_user(
                    &mut *tx,
                    &creds.username,
                    hash,
                    &record.name,
                    &record.email,
                    UserRole::Cliente,
                    &UserCapabilities::default(),
                )
                .await?;

            self.user_repo
                .grant_client_access(&mut *tx, user.id, client.id)
                .await?;
        }

        if let Some(set_id) = task_template_set_id {
            let templates = self.task_repo.list_templates(&mut *tx, set_id).await?;
            for template in &templates {
                self.task_repo
                    .create(
                        &mut *tx,
                        client.id,
                        &template.title,
                        template.description.as_deref(),
                        None,
                        template.recurrence,
                    )
                    .await?;
            }
            if !templates.is_empty() {
                tracing::info!(
                    "📋 {} tarefas recorrentes criadas para o cliente {}.",
                    templates.len(),
                    client.company
                );
            }
        }

        tx.commit().await?;

        Ok(client)
    }

    // Atualiza o cadastro e, se vier, o conjunto de acesso do login
    // principal do cliente (a permissão "acesso a outras empresas").
    pub async fn update_client(
        &self,
        client_id: Uuid,
        record: ClientRecord,
        selected_client_ids: Option<Vec<Uuid>>,
        new_password: Option<String>,
    ) -> Result<Client, AppError> {
        let password_hash = match &new_password {
            Some(p) => Some(self.auth.hash_password(p).await?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let client = self.client_repo.update(&mut *tx, client_id, &record).await?;

        let primary_user = self
            .user_repo
            .find_primary_client_user(&mut *tx, client_id)
            .await?;

        if let Some(user) = &primary_user {
            if let Some(ids) = selected_client_ids {
                // A empresa principal sempre permanece no conjunto.
                self.user_repo.revoke_all_grants(&mut *tx, user.id).await?;
                self.user_repo
                    .grant_client_access(&mut *tx, user.id, client_id)
                    .await?;
                for id in ids {
                    if id != client_id {
                        self.user_repo
                            .grant_client_access(&mut *tx, user.id, id)
                            .await?;
                    }
                }
            }

            if let Some(hash) = &password_hash {
                self.user_repo.set_password(&mut *tx, user.id, hash).await?;
            }
        }

        tx.commit().await?;

        Ok(client)
    }

    pub async fn inactivate(&self, client_id: Uuid) -> Result<Client, AppError> {
        self.client_repo
            .set_status(&self.pool, client_id, ClientStatus::Inativo)
            .await
    }

    // Exclusão definitiva: só para inativos. Remove também o login de
    // autoatendimento quando ele não acessa mais nenhuma outra empresa.
    pub async fn delete_client(&self, client_id: Uuid) -> Result<(), AppError> {
        let client = self
            .client_repo
            .find_by_id(&self.pool, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        if client.status == ClientStatus::Ativo {
            return Err(AppError::ClientStillActive);
        }

        let mut tx = self.pool.begin().await?;

        let primary_user = self
            .user_repo
            .find_primary_client_user(&mut *tx, client_id)
            .await?;

        // O DELETE em cascata remove grants, faturas, tarefas e insights.
        self.client_repo.delete(&mut *tx, client_id).await?;

        if let Some(user) = primary_user {
            let remaining = self.user_repo.list_client_ids(&mut *tx, user.id).await?;
            if remaining.is_empty() {
                self.user_repo.delete_user(&mut *tx, user.id).await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }
}
