//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;
use crate::services::reminder_service::start_reminder_scheduler;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante o login AdminGeral inicial (idempotente)
    app_state
        .auth_service
        .ensure_default_admin()
        .await
        .expect("Falha ao garantir o usuário administrador inicial.");

    // Job de lembretes (faturas e tarefas pendentes, a cada 8 horas)
    start_reminder_scheduler(app_state.clone())
        .await
        .expect("Falha ao iniciar o agendador de lembretes.");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas de usuário (perfil + gestão de administradores)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route("/{id}", put(handlers::users::update_user));

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/{id}/inactivate", post(handlers::clients::inactivate_client))
        .route(
            "/{id}/opportunities",
            post(handlers::insights::generate_opportunities)
                .get(handlers::insights::list_opportunities),
        )
        .route(
            "/{id}/compliance",
            post(handlers::insights::generate_compliance)
                .get(handlers::insights::list_compliance),
        );

    let billing_routes = Router::new()
        .route(
            "/",
            post(handlers::billing::create_invoice).get(handlers::billing::list_invoices),
        )
        .route("/{id}", delete(handlers::billing::delete_invoice))
        .route("/{id}/status", put(handlers::billing::update_invoice_status))
        .route("/{id}/boleto", get(handlers::billing::get_invoice_boleto));

    let task_routes = Router::new()
        .route(
            "/",
            post(handlers::tasks::create_task).get(handlers::tasks::list_tasks),
        )
        .route("/{id}", delete(handlers::tasks::delete_task))
        .route("/{id}/status", put(handlers::tasks::update_task_status));

    let template_set_routes = Router::new().route(
        "/",
        post(handlers::tasks::create_template_set).get(handlers::tasks::list_template_sets),
    );

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route(
            "/{id}/read",
            put(handlers::notifications::mark_notification_read),
        )
        .route(
            "/read-all",
            put(handlers::notifications::mark_all_notifications_read),
        );

    let registry_routes =
        Router::new().route("/cnpj/{cnpj}", get(handlers::insights::lookup_cnpj));

    let settings_routes = Router::new().route(
        "/",
        get(handlers::settings::get_settings).put(handlers::settings::update_settings),
    );

    let report_routes = Router::new().route("/summary", get(handlers::reports::get_summary));

    // Tudo (menos login e health) atrás do guard de autenticação
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/invoices", billing_routes)
        .nest("/api/tasks", task_routes)
        .nest("/api/task-template-sets", template_set_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/registry", registry_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/reports", report_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
