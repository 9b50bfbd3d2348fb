// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    db::user_repo::UserCapabilities,
    models::auth::{Claims, SessionUser, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, SessionUser), AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação de bcrypt fora do runtime async
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let client_ids = self.user_repo.list_client_ids(&self.pool, user.id).await?;
        let session = SessionUser { user, client_ids };
        let token = self.create_token(session.user.id)?;

        Ok((token, session))
    }

    // Valida o token e carrega o usuário com seu conjunto de acesso.
    pub async fn validate_token(&self, token: &str) -> Result<SessionUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let client_ids = self.user_repo.list_client_ids(&self.pool, user.id).await?;

        Ok(SessionUser { user, client_ids })
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    // Garante o usuário AdminGeral inicial (idempotente, roda no startup).
    pub async fn ensure_default_admin(&self) -> Result<(), AppError> {
        if self.user_repo.find_by_username("admin").await?.is_some() {
            return Ok(());
        }

        let hashed = self.hash_password("123456").await?;
        self.user_repo
            .create_user(
                &self.pool,
                "admin",
                &hashed,
                "Admin Geral",
                "admin@jzf.com.br",
                UserRole::AdminGeral,
                &UserCapabilities::all(),
            )
            .await?;

        tracing::info!("👤 Usuário AdminGeral inicial criado (username: admin).");
        Ok(())
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
