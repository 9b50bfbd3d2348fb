// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth / Users ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::update_user,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::inactivate_client,
        handlers::clients::delete_client,

        // --- Billing ---
        handlers::billing::create_invoice,
        handlers::billing::list_invoices,
        handlers::billing::update_invoice_status,
        handlers::billing::delete_invoice,
        handlers::billing::get_invoice_boleto,

        // --- Tasks ---
        handlers::tasks::create_task,
        handlers::tasks::list_tasks,
        handlers::tasks::update_task_status,
        handlers::tasks::delete_task,
        handlers::tasks::create_template_set,
        handlers::tasks::list_template_sets,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_notification_read,
        handlers::notifications::mark_all_notifications_read,

        // --- Insights ---
        handlers::insights::lookup_cnpj,
        handlers::insights::generate_opportunities,
        handlers::insights::list_opportunities,
        handlers::insights::generate_compliance,
        handlers::insights::list_compliance,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Reports ---
        handlers::reports::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::SessionUser,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            handlers::users::CapabilitiesPayload,
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,

            // --- Clients ---
            models::client::TaxRegime,
            models::client::ClientStatus,
            models::client::Client,
            handlers::clients::ClientPayload,
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,

            // --- Billing ---
            models::billing::InvoiceStatus,
            models::billing::Invoice,
            handlers::billing::CreateInvoicePayload,
            handlers::billing::UpdateInvoiceStatusPayload,

            // --- Tasks ---
            models::task::TaskStatus,
            models::task::TaskRecurrence,
            models::task::Task,
            models::task::TaskTemplateSet,
            models::task::TaskTemplate,
            models::task::TaskTemplateSetDetail,
            handlers::tasks::CreateTaskPayload,
            handlers::tasks::UpdateTaskStatusPayload,
            handlers::tasks::TemplatePayload,
            handlers::tasks::CreateTemplateSetPayload,

            // --- Notifications ---
            models::notification::AppNotification,

            // --- Insights ---
            models::insights::Insight,
            models::insights::InsightItem,
            models::insights::CnpjPrefill,

            // --- Settings ---
            models::settings::FirmSettings,
            models::settings::UpdateSettingsRequest,

            // --- Reports ---
            models::reports::ReportsSummary,
            models::reports::RegimeCount,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Perfil"),
        (name = "Users", description = "Gestão de Administradores"),
        (name = "Clients", description = "Gestão de Empresas Clientes"),
        (name = "Billing", description = "Cobranças e Boletos"),
        (name = "Tasks", description = "Tarefas e Rotinas Recorrentes"),
        (name = "Notifications", description = "Notificações In-App"),
        (name = "Insights", description = "Consulta de CNPJ e Análises de IA"),
        (name = "Settings", description = "Configurações do Escritório"),
        (name = "Reports", description = "Indicadores Consolidados")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
