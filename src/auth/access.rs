use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Role carried in token claims. Users hold `client`/`lawyer`, administrators
/// hold `admin`/`super-admin` — a separate identity space sharing one claim
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Client,
    Lawyer,
    Admin,
    SuperAdmin,
}

impl From<crate::models::users::Role> for Role {
    fn from(role: crate::models::users::Role) -> Self {
        match role {
            crate::models::users::Role::Client => Role::Client,
            crate::models::users::Role::Lawyer => Role::Lawyer,
        }
    }
}

impl From<crate::models::admins::AdminRole> for Role {
    fn from(role: crate::models::admins::AdminRole) -> Self {
        match role {
            crate::models::admins::AdminRole::Admin => Role::Admin,
            crate::models::admins::AdminRole::SuperAdmin => Role::SuperAdmin,
        }
    }
}

/// The caller's validated claims: trusted once signature and expiry checks
/// have passed. All access-control predicates are pure functions over this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

pub fn is_any_admin(ident: &Identity) -> bool {
    matches!(ident.role, Role::Admin | Role::SuperAdmin)
}

pub fn is_super_admin(ident: &Identity) -> bool {
    ident.role == Role::SuperAdmin
}

/// Caller is the target user, or holds any admin role.
pub fn is_self_or_admin(ident: &Identity, target_id: Uuid) -> bool {
    ident.id == target_id || is_any_admin(ident)
}

/// Caller is the super-admin, or is the targeted admin account itself.
pub fn is_super_or_self_admin(ident: &Identity, target_admin_id: Uuid) -> bool {
    is_super_admin(ident) || (is_any_admin(ident) && ident.id == target_admin_id)
}

/// Exact role match for client-only / lawyer-only endpoints.
pub fn has_role(ident: &Identity, role: Role) -> bool {
    ident.role == role
}

// `require_*` companions: guard clauses called at the top of handlers.
// Failure rejects with an authorization error; no retry, no escalation.

pub fn require_any_admin(ident: &Identity) -> Result<(), ApiError> {
    if is_any_admin(ident) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("Admin access required".to_string()))
    }
}

pub fn require_super_admin(ident: &Identity) -> Result<(), ApiError> {
    if is_super_admin(ident) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(
            "Super-admin access required".to_string(),
        ))
    }
}

pub fn require_self_or_admin(ident: &Identity, target_id: Uuid) -> Result<(), ApiError> {
    if is_self_or_admin(ident, target_id) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(
            "You can only access your own account".to_string(),
        ))
    }
}

pub fn require_super_or_self_admin(ident: &Identity, target_admin_id: Uuid) -> Result<(), ApiError> {
    if is_super_or_self_admin(ident, target_admin_id) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(
            "You can only access your own admin account".to_string(),
        ))
    }
}

pub fn require_role(ident: &Identity, role: Role) -> Result<(), ApiError> {
    if has_role(ident, role) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized(format!(
            "This endpoint requires the {role:?} role"
        )))
    }
}
