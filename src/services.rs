pub mod auth;
pub mod billing_service;
pub mod boleto_service;
pub mod client_service;
pub mod insights_service;
pub mod notification_service;
pub mod registry_service;
pub mod reminder_service;
pub mod task_service;
