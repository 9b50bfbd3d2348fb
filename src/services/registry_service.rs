// src/services/registry_service.rs
//
// Consulta de dados cadastrais públicos por CNPJ (formato BrasilAPI),
// usada para pré-preencher o formulário de cadastro de cliente.

use crate::{
    common::error::AppError,
    models::insights::{CnpjPrefill, RegistryCompany},
};

const DEFAULT_REGISTRY_URL: &str = "https://brasilapi.com.br/api/cnpj/v1";

#[derive(Clone)]
pub struct RegistryService {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryService {
    pub fn new(http: reqwest::Client) -> Self {
        let base_url =
            std::env::var("REGISTRY_API_URL").unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
        Self { http, base_url }
    }

    pub async fn lookup_cnpj(&self, raw_cnpj: &str) -> Result<CnpjPrefill, AppError> {
        let cnpj = sanitize_cnpj(raw_cnpj).ok_or(AppError::InvalidCnpj)?;

        let url = format!("{}/{}", self.base_url, cnpj);
        let response = self.http.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::InvalidCnpj);
        }
        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Consulta de CNPJ retornou status {}",
                response.status()
            )));
        }

        let company: RegistryCompany = response.json().await?;
        Ok(map_prefill(cnpj, company))
    }
}

// Aceita CNPJ com ou sem máscara; o resultado tem sempre 14 dígitos.
pub fn sanitize_cnpj(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 14 { Some(digits) } else { None }
}

pub fn map_prefill(cnpj: String, company: RegistryCompany) -> CnpjPrefill {
    // Nome de contato: primeiro sócio do QSA, senão a razão social.
    let name = company
        .qsa
        .first()
        .map(|p| p.nome_socio.clone())
        .unwrap_or_else(|| company.razao_social.clone());

    let display_name = company
        .nome_fantasia
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| company.razao_social.clone());

    let mut cnaes: Vec<String> = Vec::new();
    if let Some(principal) = company.cnae_fiscal {
        cnaes.push(principal.to_string());
    }
    cnaes.extend(company.cnaes_secundarios.iter().map(|c| c.codigo.to_string()));

    CnpjPrefill {
        cnpj,
        name,
        company: display_name,
        email: company.email.filter(|s| !s.trim().is_empty()),
        phone: company.ddd_telefone_1.filter(|s| !s.trim().is_empty()),
        cnaes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::insights::{RegistryPartner, RegistrySecondaryCnae};

    #[test]
    fn sanitize_strips_mask() {
        assert_eq!(
            sanitize_cnpj("12.345.678/0001-99"),
            Some("12345678000199".to_string())
        );
    }

    #[test]
    fn sanitize_rejects_wrong_length() {
        assert_eq!(sanitize_cnpj("123456"), None);
        assert_eq!(sanitize_cnpj(""), None);
    }

    #[test]
    fn prefill_prefers_fantasy_name_and_first_partner() {
        let company = RegistryCompany {
            razao_social: "PADARIA EXEMPLO LTDA".to_string(),
            nome_fantasia: Some("Padaria Exemplo".to_string()),
            email: Some("contato@exemplo.com".to_string()),
            ddd_telefone_1: Some("11999990000".to_string()),
            cnae_fiscal: Some(1091102),
            cnaes_secundarios: vec![RegistrySecondaryCnae { codigo: 4721102 }],
            qsa: vec![RegistryPartner {
                nome_socio: "Maria da Silva".to_string(),
            }],
        };

        let prefill = map_prefill("12345678000199".to_string(), company);
        assert_eq!(prefill.name, "Maria da Silva");
        assert_eq!(prefill.company, "Padaria Exemplo");
        assert_eq!(prefill.cnaes, vec!["1091102", "4721102"]);
    }

    #[test]
    fn prefill_falls_back_to_legal_name() {
        let company = RegistryCompany {
            razao_social: "PADARIA EXEMPLO LTDA".to_string(),
            nome_fantasia: Some("   ".to_string()),
            email: None,
            ddd_telefone_1: None,
            cnae_fiscal: None,
            cnaes_secundarios: vec![],
            qsa: vec![],
        };

        let prefill = map_prefill("12345678000199".to_string(), company);
        assert_eq!(prefill.name, "PADARIA EXEMPLO LTDA");
        assert_eq!(prefill.company, "PADARIA EXEMPLO LTDA");
        assert!(prefill.cnaes.is_empty());
        assert!(prefill.email.is_none());
    }
}
