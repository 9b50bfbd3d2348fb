// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{SessionUser, User},
};

/// 1. O Trait que define o que é uma Capacidade
pub trait CapabilityDef: Send + Sync + 'static {
    fn label() -> &'static str;
    fn check(user: &User) -> bool;
}

/// 2. O Extractor (Guardião)
pub struct RequireCapability<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireCapability<T>
where
    T: CapabilityDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<SessionUser>()
            .ok_or(AppError::InvalidToken)?;

        // AdminGeral sempre passa; os demais dependem da flag da conta.
        if session.is_admin_geral() || T::check(&session.user) {
            return Ok(RequireCapability(PhantomData));
        }

        Err(AppError::AccessDenied(format!(
            "Você precisa da permissão '{}' para realizar esta ação.",
            T::label()
        )))
    }
}

// ---
// DEFINIÇÃO DAS CAPACIDADES (TIPOS)
// ---

pub struct CanManageClients;
impl CapabilityDef for CanManageClients {
    fn label() -> &'static str {
        "gerenciar clientes"
    }
    fn check(user: &User) -> bool {
        user.can_manage_clients
    }
}

pub struct CanManageBilling;
impl CapabilityDef for CanManageBilling {
    fn label() -> &'static str {
        "gerenciar cobranças"
    }
    fn check(user: &User) -> bool {
        user.can_manage_billing
    }
}

pub struct CanManageTasks;
impl CapabilityDef for CanManageTasks {
    fn label() -> &'static str {
        "gerenciar tarefas"
    }
    fn check(user: &User) -> bool {
        user.can_manage_tasks
    }
}

pub struct CanManageAdmins;
impl CapabilityDef for CanManageAdmins {
    fn label() -> &'static str {
        "gerenciar administradores"
    }
    fn check(user: &User) -> bool {
        user.can_manage_admins
    }
}

pub struct CanManageSettings;
impl CapabilityDef for CanManageSettings {
    fn label() -> &'static str {
        "gerenciar configurações"
    }
    fn check(user: &User) -> bool {
        user.can_manage_settings
    }
}

pub struct CanViewReports;
impl CapabilityDef for CanViewReports {
    fn label() -> &'static str {
        "visualizar relatórios"
    }
    fn check(user: &User) -> bool {
        user.can_view_reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn admin_user(all_capabilities: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "teste".into(),
            password_hash: "hash".into(),
            name: "Teste".into(),
            email: "teste@jzf.com.br".into(),
            role: UserRole::Admin,
            can_manage_clients: all_capabilities,
            can_manage_billing: all_capabilities,
            can_manage_tasks: all_capabilities,
            can_manage_admins: all_capabilities,
            can_manage_settings: all_capabilities,
            can_view_reports: all_capabilities,
            can_view_dashboard: all_capabilities,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn capability_flag_gates_access() {
        let mut user = admin_user(false);
        assert!(!CanManageBilling::check(&user));
        user.can_manage_billing = true;
        assert!(CanManageBilling::check(&user));
    }

    #[test]
    fn all_capabilities_pass_every_check() {
        let user = admin_user(true);
        assert!(CanManageClients::check(&user));
        assert!(CanManageBilling::check(&user));
        assert!(CanManageTasks::check(&user));
        assert!(CanManageAdmins::check(&user));
        assert!(CanManageSettings::check(&user));
        assert!(CanViewReports::check(&user));
    }
}
