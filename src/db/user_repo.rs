// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

const USER_COLUMNS: &str = r#"
    id, username, password_hash, name, email, role,
    can_manage_clients, can_manage_billing, can_manage_tasks,
    can_manage_admins, can_manage_settings, can_view_reports,
    can_view_dashboard, created_at, updated_at
"#;

// O repositório de usuários, responsável por todas as interações
// com as tabelas 'users' e 'user_clients'.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name ASC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(users)
    }

    // Cria um novo usuário, com tratamento específico para username duplicado.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        name: &str,
        email: &str,
        role: UserRole,
        capabilities: &UserCapabilities,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                username, password_hash, name, email, role,
                can_manage_clients, can_manage_billing, can_manage_tasks,
                can_manage_admins, can_manage_settings, can_view_reports,
                can_view_dashboard
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(capabilities.can_manage_clients)
        .bind(capabilities.can_manage_billing)
        .bind(capabilities.can_manage_tasks)
        .bind(capabilities.can_manage_admins)
        .bind(capabilities.can_manage_settings)
        .bind(capabilities.can_view_reports)
        .bind(capabilities.can_view_dashboard)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UsernameAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn update_profile<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        email: &str,
        capabilities: &UserCapabilities,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                name = $2, email = $3,
                can_manage_clients = $4, can_manage_billing = $5,
                can_manage_tasks = $6, can_manage_admins = $7,
                can_manage_settings = $8, can_view_reports = $9,
                can_view_dashboard = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(capabilities.can_manage_clients)
        .bind(capabilities.can_manage_billing)
        .bind(capabilities.can_manage_tasks)
        .bind(capabilities.can_manage_admins)
        .bind(capabilities.can_manage_settings)
        .bind(capabilities.can_view_reports)
        .bind(capabilities.can_view_dashboard)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    pub async fn set_password<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(password_hash)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  CONJUNTO DE ACESSO (user_clients)
    // =========================================================================

    pub async fn list_client_ids<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT client_id FROM user_clients WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    pub async fn grant_client_access<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        client_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO user_clients (user_id, client_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(client_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn revoke_all_grants<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM user_clients WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    // Usuário de login principal de uma empresa (o de perfil Cliente).
    pub async fn find_primary_client_user<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            JOIN user_clients uc ON uc.user_id = u.id
            WHERE uc.client_id = $1 AND u.role = 'CLIENTE'
            ORDER BY u.created_at ASC
            LIMIT 1
            "#
        ))
        .bind(client_id)
        .fetch_optional(executor)
        .await?;
        Ok(maybe_user)
    }

    // Todos os usuários cujo conjunto de acesso inclui a empresa.
    // É o alvo do fan-out de notificações.
    pub async fn users_with_access_to<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM user_clients WHERE client_id = $1",
        )
        .bind(client_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    pub async fn delete_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

// Agrupa os flags booleanos para não espalhar 7 argumentos por todo lado.
#[derive(Debug, Clone, Default)]
pub struct UserCapabilities {
    pub can_manage_clients: bool,
    pub can_manage_billing: bool,
    pub can_manage_tasks: bool,
    pub can_manage_admins: bool,
    pub can_manage_settings: bool,
    pub can_view_reports: bool,
    pub can_view_dashboard: bool,
}

impl UserCapabilities {
    pub fn all() -> Self {
        Self {
            can_manage_clients: true,
            can_manage_billing: true,
            can_manage_tasks: true,
            can_manage_admins: true,
            can_manage_settings: true,
            can_view_reports: true,
            can_view_dashboard: true,
        }
    }
}
