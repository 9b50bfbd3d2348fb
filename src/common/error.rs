use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Nome de usuário já existe")]
    UsernameAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Fatura não encontrada")]
    InvoiceNotFound,

    #[error("Tarefa não encontrada")]
    TaskNotFound,

    #[error("Notificação não encontrada")]
    NotificationNotFound,

    #[error("Acesso negado: {0}")]
    AccessDenied(String),

    // Exclusão definitiva só é permitida para clientes inativos
    #[error("Cliente ainda está ativo")]
    ClientStillActive,

    #[error("CNPJ inválido")]
    InvalidCnpj,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Falhas nos colaboradores externos (Receita Federal, serviço de IA)
    #[error("Serviço externo indisponível: {0}")]
    ExternalServiceError(String),

    #[error("Erro de requisição HTTP")]
    HttpClientError(#[from] reqwest::Error),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::UsernameAlreadyExists => {
                (StatusCode::CONFLICT, "Este nome de usuário já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Usuário ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::ClientNotFound => {
                (StatusCode::NOT_FOUND, "Cliente não encontrado.".to_string())
            }
            AppError::InvoiceNotFound => {
                (StatusCode::NOT_FOUND, "Fatura não encontrada.".to_string())
            }
            AppError::TaskNotFound => {
                (StatusCode::NOT_FOUND, "Tarefa não encontrada.".to_string())
            }
            AppError::NotificationNotFound => {
                (StatusCode::NOT_FOUND, "Notificação não encontrada.".to_string())
            }
            AppError::AccessDenied(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ClientStillActive => (
                StatusCode::CONFLICT,
                "Apenas clientes inativos podem ser excluídos permanentemente.".to_string(),
            ),
            AppError::InvalidCnpj => (
                StatusCode::BAD_REQUEST,
                "Informe um CNPJ válido com 14 dígitos.".to_string(),
            ),
            AppError::UniqueConstraintViolation(msg) => (StatusCode::CONFLICT, msg),
            AppError::ExternalServiceError(msg) => {
                tracing::error!("Falha em serviço externo: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::HttpClientError(ref e) => {
                tracing::error!("Erro de requisição externa: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Falha ao consultar serviço externo.".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
