// src/services/boleto_service.rs

use chrono::NaiveDate;
use genpdf::{Element, elements, style};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{ClientRepository, SettingsRepository},
    models::billing::Invoice,
};

#[derive(Clone)]
pub struct BoletoService {
    client_repo: ClientRepository,
    settings_repo: SettingsRepository,
    pool: PgPool,
}

impl BoletoService {
    pub fn new(
        client_repo: ClientRepository,
        settings_repo: SettingsRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            client_repo,
            settings_repo,
            pool,
        }
    }

    // Gera o boleto simulado da fatura como PDF em memória.
    pub async fn generate_boleto_pdf(&self, invoice: &Invoice) -> Result<Vec<u8>, AppError> {
        let client = self
            .client_repo
            .find_by_id(&self.pool, invoice.client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;
        let settings = self.settings_repo.get_settings(&self.pool).await?;

        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Boleto - {}", invoice.description));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        let firm_name = settings
            .firm_name
            .clone()
            .unwrap_or("JZF Contabilidade".to_string());
        doc.push(
            elements::Paragraph::new(firm_name.clone())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new("BOLETO DE COBRANÇA (SIMULAÇÃO)")
                .styled(style::Style::new().with_font_size(10)),
        );
        doc.push(elements::Break::new(1.5));

        // --- DADOS DO TÍTULO ---
        let beneficiario = match &settings.cnpj {
            Some(cnpj) => format!("{} - CNPJ: {}", firm_name, cnpj),
            None => firm_name.clone(),
        };
        doc.push(elements::Paragraph::new(format!("Beneficiário: {}", beneficiario)));
        doc.push(elements::Paragraph::new(format!(
            "Pagador: {} - {}",
            client.name, client.company
        )));
        doc.push(elements::Paragraph::new(format!(
            "Descrição: {}",
            invoice.description
        )));
        doc.push(elements::Break::new(1));

        doc.push(
            elements::Paragraph::new(format!(
                "Vencimento: {}",
                invoice.due_date.format("%d/%m/%Y")
            ))
            .styled(style::Style::new().bold()),
        );
        doc.push(
            elements::Paragraph::new(format!("Valor: R$ {:.2}", invoice.amount))
                .styled(style::Style::new().bold()),
        );
        doc.push(elements::Break::new(2));

        // --- LINHA DIGITÁVEL (SIMULADA) ---
        doc.push(
            elements::Paragraph::new("Linha Digitável (simulação):")
                .styled(style::Style::new().with_font_size(8)),
        );
        doc.push(elements::Paragraph::new(digitable_line(invoice)));

        // --- ÁREA DE PAGAMENTO (QR CODE PIX) ---
        if let Some(key) = &settings.pix_key {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new("PAGAMENTO VIA PIX")
                    .styled(style::Style::new().bold().with_font_size(12)),
            );
            doc.push(elements::Paragraph::new(format!("Chave: {}", key)));
            doc.push(elements::Break::new(1));

            let code = QrCode::new(key.as_bytes())
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

            let image_buffer = code.render::<Luma<u8>>().build();
            let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

            let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
                .with_scale(genpdf::Scale::new(0.5, 0.5));

            doc.push(pdf_image);
        }

        // --- RODAPÉ ---
        if let Some(link) = &settings.payment_link {
            doc.push(elements::Break::new(2));
            doc.push(
                elements::Paragraph::new(format!("Pague online: {}", link))
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // Renderiza para buffer em memória
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

// Linha digitável simulada, determinística sobre os dados da fatura:
// três campos de código de barras fictícios, dígito verificador e o campo
// final com fator de vencimento (dias desde 07/10/1997) + valor em centavos.
pub fn digitable_line(invoice: &Invoice) -> String {
    let seed = invoice.id.as_u128();
    let digits = format!("{:032}", seed % 100_000_000_000_000_000_000_000_000_000_000u128);
    let check_digit = seed % 9 + 1;

    let cents = (invoice.amount * Decimal::from(100))
        .round()
        .to_u64()
        .unwrap_or(0)
        % 10_000_000_000;

    format!(
        "{}.{} {}.{} {}.{} {} {:04}{:010}",
        &digits[..5],
        &digits[5..10],
        &digits[10..15],
        &digits[15..21],
        &digits[21..26],
        &digits[26..32],
        check_digit,
        due_date_factor(invoice.due_date),
        cents
    )
}

// Fator de vencimento padrão FEBRABAN: dias corridos desde 07/10/1997.
fn due_date_factor(due_date: NaiveDate) -> i64 {
    let base = NaiveDate::from_ymd_opt(1997, 10, 7).unwrap_or(NaiveDate::MIN);
    (due_date - base).num_days().clamp(0, 9999)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::billing::InvoiceStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_invoice(amount: &str, due: NaiveDate) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            description: "Honorários".into(),
            amount: amount.parse().unwrap(),
            due_date: due,
            status: InvoiceStatus::Pendente,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn digitable_line_has_47_digits() {
        let invoice = sample_invoice("850.00", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        let line = digitable_line(&invoice);
        let digit_count = line.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digit_count, 47);
    }

    #[test]
    fn digitable_line_is_deterministic() {
        let invoice = sample_invoice("1200.50", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(digitable_line(&invoice), digitable_line(&invoice));
    }

    #[test]
    fn digitable_line_ends_with_amount_in_cents() {
        let invoice = sample_invoice("850.00", NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        let line = digitable_line(&invoice);
        assert!(line.ends_with("0000085000"));
    }

    #[test]
    fn due_date_factor_counts_days_since_base() {
        let base = NaiveDate::from_ymd_opt(1997, 10, 7).unwrap();
        assert_eq!(due_date_factor(base), 0);
        assert_eq!(due_date_factor(base + chrono::Duration::days(1000)), 1000);
    }
}
