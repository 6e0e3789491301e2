//! Role-Based Access Control (RBAC) Module
//!
//! Provides authorization through role-based permissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::security::auth::Claims;

/// Role enumeration for access control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full system administrator
    Admin,
    /// Curator who may edit any entity
    Editor,
    /// Logged-in user editing their own profile
    SelfEditor,
    /// Anonymous visitor
    Public,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Editor => write!(f, "editor"),
            Role::SelfEditor => write!(f, "self_editor"),
            Role::Public => write!(f, "public"),
        }
    }
}

impl Role {
    /// Convert from string to Role; unknown names get the least privilege
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            "editor" | "curator" => Role::Editor,
            "self_editor" | "selfeditor" => Role::SelfEditor,
            _ => Role::Public,
        }
    }

    /// Check if role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Permissions that can be granted to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Use the lightweight interactive endpoints (autocomplete and similar)
    UseBasicAjaxControllers,
    /// All permissions wildcard
    All,
}

impl Permission {
    /// Check if this granted permission covers the requested one
    pub fn matches(&self, requested: &Permission) -> bool {
        *self == Permission::All || self == requested
    }
}

/// Default permissions for each role
pub fn get_default_permissions(role: &Role, public_autocomplete: bool) -> Vec<Permission> {
    match role {
        Role::Admin => vec![Permission::All],
        Role::Editor | Role::SelfEditor => vec![Permission::UseBasicAjaxControllers],
        Role::Public if public_autocomplete => vec![Permission::UseBasicAjaxControllers],
        Role::Public => vec![],
    }
}

/// Authorizer trait for checking permissions
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Check if a subject has permission to perform an action
    async fn check_permission(&self, claims: &Claims, permission: &Permission) -> bool;
}

/// Simple in-memory authorizer implementation
#[derive(Debug, Clone)]
pub struct SimpleAuthorizer {
    /// Role permissions cache
    permissions: Vec<(Role, Vec<Permission>)>,
}

impl SimpleAuthorizer {
    /// Create new authorizer with default permissions
    pub fn new(public_autocomplete: bool) -> Self {
        let permissions = [Role::Admin, Role::Editor, Role::SelfEditor, Role::Public]
            .into_iter()
            .map(|role| {
                let perms = get_default_permissions(&role, public_autocomplete);
                (role, perms)
            })
            .collect();

        Self { permissions }
    }

    /// Create development authorizer
    pub fn development() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl Authorizer for SimpleAuthorizer {
    async fn check_permission(&self, claims: &Claims, permission: &Permission) -> bool {
        if claims.role.is_admin() {
            return true;
        }

        self.permissions
            .iter()
            .find(|(r, _)| *r == claims.role)
            .is_some_and(|(_, perms)| perms.iter().any(|p| p.matches(permission)))
    }
}
