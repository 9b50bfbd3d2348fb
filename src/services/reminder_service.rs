// src/services/reminder_service.rs
//
// Job agendado de lembretes: varre faturas pendentes/atrasadas e tarefas
// pendentes e gera notificações para todos os usuários com acesso à
// empresa dona de cada registro. Roda a cada 8 horas (3x ao dia).

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{common::error::AppError, config::AppState};

const REMINDER_SCHEDULE: &str = "0 0 */8 * * *";

pub async fn start_reminder_scheduler(
    app_state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REMINDER_SCHEDULE, move |_uuid, _l| {
        let state = app_state.clone();
        Box::pin(async move {
            if let Err(e) = run_reminder_sweep(&state).await {
                tracing::error!("Erro na varredura de lembretes: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("⏰ Job de lembretes agendado ({}).", REMINDER_SCHEDULE);
    Ok(())
}

pub async fn run_reminder_sweep(state: &AppState) -> Result<(), AppError> {
    tracing::info!("[Scheduler] Iniciando varredura de lembretes.");

    // 0. Faturas vencidas mudam de PENDENTE para ATRASADO antes do aviso.
    let today = Utc::now().date_naive();
    let promoted = state
        .billing_repo
        .mark_overdue(&state.db_pool, today)
        .await?;
    if promoted > 0 {
        tracing::info!("[Scheduler] {} fatura(s) marcadas como atrasadas.", promoted);
    }

    // 1. Faturas pendentes/atrasadas -> lembrete por usuário com acesso.
    let pending_invoices = state.billing_repo.list_pending(&state.db_pool).await?;
    let mut invoice_reminders = 0;
    for invoice in &pending_invoices {
        let message = invoice_reminder_message(&invoice.description);
        invoice_reminders += state
            .notification_service
            .remind_client_users(invoice.client_id, &message, Some("/cobranca"))
            .await?;
    }
    if !pending_invoices.is_empty() {
        tracing::info!(
            "[Scheduler] {} lembretes enviados para {} faturas pendentes.",
            invoice_reminders,
            pending_invoices.len()
        );
    }

    // 2. Tarefas pendentes agrupadas por empresa -> um lembrete por usuário.
    let task_counts = state.task_repo.count_pending_by_client(&state.db_pool).await?;
    let mut task_reminders = 0;
    for entry in &task_counts {
        let message = task_reminder_message(entry.total);
        task_reminders += state
            .notification_service
            .remind_client_users(entry.client_id, &message, Some("/tarefas"))
            .await?;
    }
    if !task_counts.is_empty() {
        tracing::info!(
            "[Scheduler] {} lembretes enviados para {} empresas com tarefas pendentes.",
            task_reminders,
            task_counts.len()
        );
    }

    Ok(())
}

pub fn invoice_reminder_message(description: &str) -> String {
    format!(
        "Lembrete: A fatura \"{}\" está pendente de pagamento.",
        description
    )
}

pub fn task_reminder_message(count: i64) -> String {
    format!(
        "Lembrete: Você possui {} tarefa(s) pendente(s). Por favor, verifique a seção de tarefas.",
        count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_message_includes_description() {
        let message = invoice_reminder_message("Honorários de Janeiro");
        assert_eq!(
            message,
            "Lembrete: A fatura \"Honorários de Janeiro\" está pendente de pagamento."
        );
    }

    #[test]
    fn task_message_includes_count() {
        assert!(task_reminder_message(3).contains("3 tarefa(s) pendente(s)"));
    }

    #[test]
    fn schedule_runs_three_times_a_day() {
        // Expressão de 6 campos (com segundos): a cada 8 horas.
        assert_eq!(REMINDER_SCHEDULE, "0 0 */8 * * *");
    }
}
