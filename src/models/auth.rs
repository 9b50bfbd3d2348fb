// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    AdminGeral, // Acesso total, pode gerir outros administradores
    Admin,      // Acesso limitado pelos flags de capacidade
    Cliente,    // Visão restrita às empresas do seu conjunto de acesso
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub name: String,
    pub email: String,
    pub role: UserRole,

    // Flags de capacidade (só relevantes para administradores)
    pub can_manage_clients: bool,
    pub can_manage_billing: bool,
    pub can_manage_tasks: bool,
    pub can_manage_admins: bool,
    pub can_manage_settings: bool,
    pub can_view_reports: bool,
    pub can_view_dashboard: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O usuário autenticado da requisição: o registro mais o conjunto
// de empresas que ele pode acessar.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(flatten)]
    pub user: User,
    pub client_ids: Vec<Uuid>,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        !matches!(self.user.role, UserRole::Cliente)
    }

    pub fn is_admin_geral(&self) -> bool {
        matches!(self.user.role, UserRole::AdminGeral)
    }

    // Invariante central do modelo de acesso: administradores enxergam
    // todas as empresas; usuários Cliente apenas as do seu conjunto.
    pub fn can_access_client(&self, client_id: Uuid) -> bool {
        self.is_admin() || self.client_ids.contains(&client_id)
    }
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 3, message = "O usuário deve ter no mínimo 3 caracteres."))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            username: "teste".into(),
            password_hash: "hash".into(),
            name: "Teste".into(),
            email: "teste@jzf.com.br".into(),
            role,
            can_manage_clients: false,
            can_manage_billing: false,
            can_manage_tasks: false,
            can_manage_admins: false,
            can_manage_settings: false,
            can_view_reports: false,
            can_view_dashboard: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_accesses_any_client() {
        let session = SessionUser {
            user: admin_user(UserRole::Admin),
            client_ids: vec![],
        };
        assert!(session.can_access_client(Uuid::new_v4()));
    }

    #[test]
    fn cliente_restricted_to_access_set() {
        let allowed = Uuid::new_v4();
        let session = SessionUser {
            user: admin_user(UserRole::Cliente),
            client_ids: vec![allowed],
        };
        assert!(session.can_access_client(allowed));
        assert!(!session.can_access_client(Uuid::new_v4()));
    }

    #[test]
    fn password_hash_never_serialized() {
        let session = SessionUser {
            user: admin_user(UserRole::AdminGeral),
            client_ids: vec![],
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("ADMIN_GERAL"));
    }
}
