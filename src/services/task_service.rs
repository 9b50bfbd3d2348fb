// src/services/task_service.rs

use chrono::{Months, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, TaskRepository},
    models::auth::SessionUser,
    models::task::{
        Task, TaskRecurrence, TaskStatus, TaskTemplateSetDetail,
    },
    services::notification_service::NotificationService,
};

#[derive(Clone)]
pub struct TaskService {
    task_repo: TaskRepository,
    client_repo: ClientRepository,
    notifications: NotificationService,
    pool: PgPool,
}

impl TaskService {
    pub fn new(
        task_repo: TaskRepository,
        client_repo: ClientRepository,
        notifications: NotificationService,
        pool: PgPool,
    ) -> Self {
        Self {
            task_repo,
            client_repo,
            notifications,
            pool,
        }
    }

    // Cria a tarefa e avisa os usuários com acesso à empresa (fan-out).
    pub async fn create_task(
        &self,
        client_id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        recurrence: TaskRecurrence,
    ) -> Result<Task, AppError> {
        self.client_repo
            .find_by_id(&self.pool, client_id)
            .await?
            .ok_or(AppError::ClientNotFound)?;

        let task = self
            .task_repo
            .create(&self.pool, client_id, title, description, due_date, recurrence)
            .await?;

        let message = format!("Nova tarefa \"{}\" registrada para sua empresa.", task.title);
        self.notifications
            .notify_client_users(client_id, &message, Some("/tarefas"))
            .await?;

        Ok(task)
    }

    pub async fn list_for(&self, session: &SessionUser) -> Result<Vec<Task>, AppError> {
        if session.is_admin() {
            self.task_repo.list_all(&self.pool).await
        } else {
            self.task_repo
                .list_by_clients(&self.pool, &session.client_ids)
                .await
        }
    }

    // Concluir uma tarefa recorrente agenda automaticamente a próxima
    // ocorrência, com o vencimento deslocado pelo período da recorrência.
    pub async fn update_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let task = self
            .task_repo
            .update_status(&self.pool, task_id, status)
            .await?;

        if status == TaskStatus::Concluida && task.recurrence != TaskRecurrence::Nenhuma {
            let next_due = task.due_date.and_then(|d| next_due_date(d, task.recurrence));
            self.task_repo
                .create(
                    &self.pool,
                    task.client_id,
                    &task.title,
                    task.description.as_deref(),
                    next_due,
                    task.recurrence,
                )
                .await?;
        }

        Ok(task)
    }

    pub async fn delete_task(&self, task_id: Uuid) -> Result<(), AppError> {
        self.task_repo.delete(&self.pool, task_id).await
    }

    // =========================================================================
    //  CONJUNTOS DE TAREFAS RECORRENTES
    // =========================================================================

    pub async fn create_template_set(
        &self,
        name: &str,
        templates: Vec<(String, Option<String>, TaskRecurrence)>,
    ) -> Result<TaskTemplateSetDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let set = self.task_repo.create_template_set(&mut *tx, name).await?;

        let mut created = Vec::with_capacity(templates.len());
        for (title, description, recurrence) in &templates {
            let template = self
                .task_repo
                .add_template(&mut *tx, set.id, title, description.as_deref(), *recurrence)
                .await?;
            created.push(template);
        }

        tx.commit().await?;

        Ok(TaskTemplateSetDetail {
            set,
            templates: created,
        })
    }

    pub async fn list_template_sets(&self) -> Result<Vec<TaskTemplateSetDetail>, AppError> {
        let sets = self.task_repo.list_template_sets(&self.pool).await?;

        let mut details = Vec::with_capacity(sets.len());
        for set in sets {
            let templates = self.task_repo.list_templates(&self.pool, set.id).await?;
            details.push(TaskTemplateSetDetail { set, templates });
        }

        Ok(details)
    }
}

// Próximo vencimento de uma tarefa recorrente.
pub fn next_due_date(due_date: NaiveDate, recurrence: TaskRecurrence) -> Option<NaiveDate> {
    let months = match recurrence {
        TaskRecurrence::Nenhuma => return None,
        TaskRecurrence::Mensal => 1,
        TaskRecurrence::Trimestral => 3,
        TaskRecurrence::Anual => 12,
    };
    due_date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_recurrence_advances_one_month() {
        assert_eq!(
            next_due_date(date(2026, 1, 20), TaskRecurrence::Mensal),
            Some(date(2026, 2, 20))
        );
    }

    #[test]
    fn quarterly_and_yearly_recurrences() {
        assert_eq!(
            next_due_date(date(2026, 1, 31), TaskRecurrence::Trimestral),
            Some(date(2026, 4, 30))
        );
        assert_eq!(
            next_due_date(date(2026, 2, 28), TaskRecurrence::Anual),
            Some(date(2027, 2, 28))
        );
    }

    #[test]
    fn no_recurrence_has_no_next_date() {
        assert_eq!(next_due_date(date(2026, 1, 20), TaskRecurrence::Nenhuma), None);
    }
}
