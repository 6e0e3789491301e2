//! Security Module
//!
//! Provides the security features for the autocomplete API:
//! - Authentication (API Key, anonymous fallback)
//! - Authorization (RBAC)
//! - Security Middleware

pub mod auth;
pub mod middleware;
pub mod rbac;

pub use auth::{ApiKeyAuth, Authenticator, Claims, Credentials};
pub use rbac::{Authorizer, Permission, Role, SimpleAuthorizer};
