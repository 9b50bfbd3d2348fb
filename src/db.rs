pub mod user_repo;
pub use user_repo::UserRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod task_repo;
pub use task_repo::TaskRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod insights_repo;
pub use insights_repo::{InsightKind, InsightsRepository};
pub mod reports_repo;
pub use reports_repo::ReportsRepository;
