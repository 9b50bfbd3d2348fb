// src/services/insights_service.rs
//
// Geração de oportunidades tributárias e achados de conformidade via um
// endpoint de IA compatível com chat completions. O modelo devolve um
// array JSON de {title, description, source}; os itens são persistidos
// com dedup por (client_id, title, source) e a lista armazenada volta
// como resposta.

use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, InsightKind, InsightsRepository},
    models::{
        client::{Client, TaxRegime},
        insights::{Insight, InsightItem},
    },
};

const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Clone)]
pub struct InsightsService {
    insights_repo: InsightsRepository,
    client_repo: ClientRepository,
    http: reqwest::Client,
    pool: PgPool,
}

impl InsightsService {
    pub fn new(
        insights_repo: InsightsRepository,
        client_repo: ClientRepository,
        http: reqwest::Client,
        pool: PgPool,
    ) -> Self {
        Self {
            insights_repo,
            client_repo,
            http,
            pool,
        }
    }

    pub async fn generate(
        &self,
        kind: InsightKind,
        client_id: Uuid,
    ) -> Result<Vec<Insight>, AppError> {
        let client = self
            .client_repo
            .find_by_id(&self.pool, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let items = self.request_items(kind, &client).await?;

        let mut inserted = 0;
        for item in &items {
            if self
                .insights_repo
                .insert_item(&self.pool, kind, client_id, item)
                .await?
            {
                inserted += 1;
            }
        }
        tracing::info!(
            "🤖 IA retornou {} item(ns) para '{}', {} novo(s) persistido(s).",
            items.len(),
            client.company,
            inserted
        );

        self.insights_repo
            .list_by_client(&self.pool, kind, client_id)
            .await
    }

    pub async fn list(
        &self,
        kind: InsightKind,
        client_id: Uuid,
    ) -> Result<Vec<Insight>, AppError> {
        self.insights_repo
            .list_by_client(&self.pool, kind, client_id)
            .await
    }

    async fn request_items(
        &self,
        kind: InsightKind,
        client: &Client,
    ) -> Result<Vec<InsightItem>, AppError> {
        let api_url = std::env::var("AI_API_URL").map_err(|_| {
            AppError::ExternalServiceError("AI_API_URL não configurada.".to_string())
        })?;
        let api_key = std::env::var("AI_API_KEY").map_err(|_| {
            AppError::ExternalServiceError("AI_API_KEY não configurada.".to_string())
        })?;
        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string());

        let body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system_prompt(kind) },
                { "role": "user", "content": build_prompt(client) }
            ],
            "temperature": 0.2,
        });

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Serviço de IA retornou status {}",
                response.status()
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                AppError::ExternalServiceError(
                    "Serviço de IA não retornou nenhuma resposta.".to_string(),
                )
            })?;

        parse_items(content)
    }
}

fn system_prompt(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Opportunity => {
            "Você é um consultor tributário brasileiro. Dado o perfil de uma empresa, \
             liste oportunidades tributárias concretas. Responda APENAS com um array JSON \
             de objetos {\"title\", \"description\", \"source\"}, onde source cita a norma \
             ou lei aplicável."
        }
        InsightKind::Compliance => {
            "Você é um consultor de conformidade fiscal brasileiro. Dado o perfil de uma \
             empresa, liste obrigações e riscos de conformidade relevantes. Responda APENAS \
             com um array JSON de objetos {\"title\", \"description\", \"source\"}, onde \
             source cita a norma ou lei aplicável."
        }
    }
}

fn regime_label(regime: TaxRegime) -> &'static str {
    match regime {
        TaxRegime::SimplesNacional => "Simples Nacional",
        TaxRegime::LucroPresumido => "Lucro Presumido",
        TaxRegime::LucroReal => "Lucro Real",
    }
}

fn build_prompt(client: &Client) -> String {
    let mut prompt = format!(
        "Empresa: {}\nRegime tributário: {}\n",
        client.company,
        regime_label(client.tax_regime)
    );
    if !client.cnaes.is_empty() {
        prompt.push_str(&format!("CNAEs: {}\n", client.cnaes.join(", ")));
    }
    if !client.keywords.is_empty() {
        prompt.push_str(&format!("Palavras-chave: {}\n", client.keywords.join(", ")));
    }
    if let Some(description) = client
        .business_description
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        prompt.push_str(&format!("Descrição do negócio: {}\n", description));
    }
    prompt
}

// O modelo às vezes embrulha o JSON em cerca de código markdown.
fn parse_items(content: &str) -> Result<Vec<InsightItem>, AppError> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(trimmed).map_err(|e| {
        AppError::ExternalServiceError(format!(
            "Resposta da IA fora do formato esperado: {}",
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::ClientStatus;
    use chrono::Utc;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "Maria da Silva".to_string(),
            company: "Padaria Exemplo".to_string(),
            cnpj: Some("12345678000199".to_string()),
            email: "contato@exemplo.com".to_string(),
            phone: "11999990000".to_string(),
            tax_regime: TaxRegime::SimplesNacional,
            status: ClientStatus::Ativo,
            cnaes: vec!["1091102".to_string()],
            keywords: vec!["panificação".to_string()],
            business_description: Some("Padaria de bairro.".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn prompt_includes_business_profile() {
        let prompt = build_prompt(&sample_client());
        assert!(prompt.contains("Padaria Exemplo"));
        assert!(prompt.contains("Simples Nacional"));
        assert!(prompt.contains("1091102"));
        assert!(prompt.contains("panificação"));
        assert!(prompt.contains("Padaria de bairro."));
    }

    #[test]
    fn parse_items_accepts_plain_array() {
        let items = parse_items(
            r#"[{"title": "Crédito de PIS", "description": "Insumos", "source": "Lei 10.637/2002"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Crédito de PIS");
    }

    #[test]
    fn parse_items_strips_markdown_fence() {
        let items = parse_items(
            "```json\n[{\"title\": \"A\", \"source\": \"Lei X\"}]\n```",
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].description.is_none());
    }

    #[test]
    fn parse_items_rejects_garbage() {
        assert!(parse_items("desculpe, não consigo ajudar").is_err());
    }
}
