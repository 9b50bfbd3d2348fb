// src/db/task_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::task::{Task, TaskRecurrence, TaskStatus, TaskTemplate, TaskTemplateSet},
};

const TASK_COLUMNS: &str =
    "id, client_id, title, description, due_date, recurrence, status, created_at, updated_at";

// Quantas tarefas pendentes cada empresa acumulou (para o lembrete agrupado)
#[derive(Debug, Clone, FromRow)]
pub struct PendingTaskCount {
    pub client_id: Uuid,
    pub total: i64,
}

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        title: &str,
        description: Option<&str>,
        due_date: Option<NaiveDate>,
        recurrence: TaskRecurrence,
    ) -> Result<Task, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (client_id, title, description, due_date, recurrence)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(client_id)
        .bind(title)
        .bind(description)
        .bind(due_date)
        .bind(recurrence)
        .fetch_one(executor)
        .await?;

        Ok(task)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        task_id: Uuid,
    ) -> Result<Option<Task>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(task_id)
        .fetch_optional(executor)
        .await?;
        Ok(task)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<Task>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC"
        ))
        .fetch_all(executor)
        .await?;
        Ok(tasks)
    }

    pub async fn list_by_clients<'e, E>(
        &self,
        executor: E,
        client_ids: &[Uuid],
    ) -> Result<Vec<Task>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE client_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(client_ids)
        .fetch_all(executor)
        .await?;
        Ok(tasks)
    }

    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::TaskNotFound)?;

        Ok(task)
    }

    pub async fn delete<'e, E>(&self, executor: E, task_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TaskNotFound);
        }
        Ok(())
    }

    // Agrupamento usado pelo job de lembretes.
    pub async fn count_pending_by_client<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<PendingTaskCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let counts = sqlx::query_as::<_, PendingTaskCount>(
            r#"
            SELECT client_id, COUNT(*) AS total
            FROM tasks
            WHERE status = 'PENDENTE'
            GROUP BY client_id
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(counts)
    }

    // =========================================================================
    //  CONJUNTOS DE TAREFAS RECORRENTES (modelos)
    // =========================================================================

    pub async fn create_template_set<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<TaskTemplateSet, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let set = sqlx::query_as::<_, TaskTemplateSet>(
            r#"
            INSERT INTO task_template_sets (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O conjunto '{}' já existe.",
                        name
                    ));
                }
            }
            e.into()
        })?;

        Ok(set)
    }

    pub async fn add_template<'e, E>(
        &self,
        executor: E,
        set_id: Uuid,
        title: &str,
        description: Option<&str>,
        recurrence: TaskRecurrence,
    ) -> Result<TaskTemplate, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let template = sqlx::query_as::<_, TaskTemplate>(
            r#"
            INSERT INTO task_templates (set_id, title, description, recurrence)
            VALUES ($1, $2, $3, $4)
            RETURNING id, set_id, title, description, recurrence
            "#,
        )
        .bind(set_id)
        .bind(title)
        .bind(description)
        .bind(recurrence)
        .fetch_one(executor)
        .await?;

        Ok(template)
    }

    pub async fn list_template_sets<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<TaskTemplateSet>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sets = sqlx::query_as::<_, TaskTemplateSet>(
            "SELECT id, name, created_at FROM task_template_sets ORDER BY name ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(sets)
    }

    pub async fn list_templates<'e, E>(
        &self,
        executor: E,
        set_id: Uuid,
    ) -> Result<Vec<TaskTemplate>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let templates = sqlx::query_as::<_, TaskTemplate>(
            r#"
            SELECT id, set_id, title, description, recurrence
            FROM task_templates
            WHERE set_id = $1
            ORDER BY title ASC
            "#,
        )
        .bind(set_id)
        .fetch_all(executor)
        .await?;
        Ok(templates)
    }
}
