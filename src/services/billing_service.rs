// src/services/billing_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillingRepository, ClientRepository},
    models::auth::SessionUser,
    models::billing::{Invoice, InvoiceStatus},
    services::notification_service::NotificationService,
};

#[derive(Clone)]
pub struct BillingService {
    billing_repo: BillingRepository,
    client_repo: ClientRepository,
    notifications: NotificationService,
    pool: PgPool,
}

impl BillingService {
    pub fn new(
        billing_repo: BillingRepository,
        client_repo: ClientRepository,
        notifications: NotificationService,
        pool: PgPool,
    ) -> Self {
        Self {
            billing_repo,
            client_repo,
            notifications,
            pool,
        }
    }

    // Cria a fatura e avisa todos os usuários com acesso à empresa
    // (invariante do fan-out de notificações).
    pub async fn create_invoice(
        &self,
        client_id: Uuid,
        description: &str,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Invoice, AppError> {
        self.client_repo
            .find_by_id(&self.pool, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let invoice = self
            .billing_repo
            .create(&self.pool, client_id, description, amount, due_date)
            .await?;

        let message = format!(
            "Nova fatura \"{}\" disponível, com vencimento em {}.",
            invoice.description,
            invoice.due_date.format("%d/%m/%Y")
        );
        self.notifications
            .notify_client_users(client_id, &message, Some("/cobranca"))
            .await?;

        Ok(invoice)
    }

    pub async fn list_for(&self, session: &SessionUser) -> Result<Vec<Invoice>, AppError> {
        if session.is_admin() {
            self.billing_repo.list_all(&self.pool).await
        } else {
            self.billing_repo
                .list_by_clients(&self.pool, &session.client_ids)
                .await
        }
    }

    pub async fn get_for(
        &self,
        session: &SessionUser,
        invoice_id: Uuid,
    ) -> Result<Invoice, AppError> {
        let invoice = self
            .billing_repo
            .find_by_id(&self.pool, invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound)?;

        if !session.can_access_client(invoice.client_id) {
            return Err(AppError::AccessDenied(
                "Você não tem acesso a esta fatura.".to_string(),
            ));
        }

        Ok(invoice)
    }

    pub async fn update_status(
        &self,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> Result<Invoice, AppError> {
        self.billing_repo
            .update_status(&self.pool, invoice_id, status)
            .await
    }

    pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), AppError> {
        self.billing_repo.delete(&self.pool, invoice_id).await
    }
}
