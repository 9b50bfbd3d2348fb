pub mod auth;
pub mod billing;
pub mod clients;
pub mod insights;
pub mod notifications;
pub mod reports;
pub mod settings;
pub mod tasks;
pub mod users;
