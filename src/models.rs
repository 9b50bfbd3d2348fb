pub mod auth;
pub mod billing;
pub mod client;
pub mod insights;
pub mod notification;
pub mod reports;
pub mod settings;
pub mod task;
