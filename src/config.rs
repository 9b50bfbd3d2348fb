// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        BillingRepository, ClientRepository, InsightsRepository, NotificationRepository,
        ReportsRepository, SettingsRepository, TaskRepository, UserRepository,
    },
    services::{
        auth::AuthService, billing_service::BillingService, boleto_service::BoletoService,
        client_service::ClientService, insights_service::InsightsService,
        notification_service::NotificationService, registry_service::RegistryService,
        task_service::TaskService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Repositórios
    pub user_repo: UserRepository,
    pub client_repo: ClientRepository,
    pub billing_repo: BillingRepository,
    pub task_repo: TaskRepository,
    pub notification_repo: NotificationRepository,
    pub settings_repo: SettingsRepository,
    pub insights_repo: InsightsRepository,
    pub reports_repo: ReportsRepository,

    // Serviços
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub billing_service: BillingService,
    pub boleto_service: BoletoService,
    pub task_service: TaskService,
    pub notification_service: NotificationService,
    pub registry_service: RegistryService,
    pub insights_service: InsightsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Cliente HTTP compartilhado (Receita Federal / IA)
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let task_repo = TaskRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let insights_repo = InsightsRepository::new(db_pool.clone());
        let reports_repo = ReportsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let notification_service = NotificationService::new(
            notification_repo.clone(),
            user_repo.clone(),
            db_pool.clone(),
        );
        let client_service = ClientService::new(
            client_repo.clone(),
            user_repo.clone(),
            task_repo.clone(),
            auth_service.clone(),
            db_pool.clone(),
        );
        let billing_service = BillingService::new(
            billing_repo.clone(),
            client_repo.clone(),
            notification_service.clone(),
            db_pool.clone(),
        );
        let boleto_service = BoletoService::new(
            client_repo.clone(),
            settings_repo.clone(),
            db_pool.clone(),
        );
        let task_service = TaskService::new(
            task_repo.clone(),
            client_repo.clone(),
            notification_service.clone(),
            db_pool.clone(),
        );
        let registry_service = RegistryService::new(http_client.clone());
        let insights_service = InsightsService::new(
            insights_repo.clone(),
            client_repo.clone(),
            http_client,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            user_repo,
            client_repo,
            billing_repo,
            task_repo,
            notification_repo,
            settings_repo,
            insights_repo,
            reports_repo,
            auth_service,
            client_service,
            billing_service,
            boleto_service,
            task_service,
            notification_service,
            registry_service,
            insights_service,
        })
    }
}
