//! Authentication Module
//!
//! Identifies the caller from an API key. Callers without credentials are
//! treated as anonymous and receive the public role; whether that role may
//! use the autocomplete endpoint is decided by the authorizer.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::security::rbac::Role;

/// Credentials extracted from a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    /// API key (if provided)
    pub api_key: Option<String>,
}

impl Credentials {
    /// Create new credentials
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Try to extract credentials from Authorization header
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        match auth_header {
            Some(header) => {
                let key = header
                    .strip_prefix("ApiKey ")
                    .or_else(|| header.strip_prefix("Bearer "));
                Self::new(key.map(|k| k.trim().to_string()))
            }
            None => Self::default(),
        }
    }
}

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Subject: the API key owner, or "anonymous"
    pub sub: String,
    /// Caller role
    pub role: Role,
}

impl Claims {
    /// Claims for a caller that presented no credentials
    pub fn anonymous() -> Self {
        Self {
            sub: "anonymous".to_string(),
            role: Role::Public,
        }
    }
}

/// Authentication trait
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate credentials and return the caller's claims
    async fn authenticate(&self, credentials: &Credentials) -> Result<Claims>;
    /// Get the authenticator type
    fn authenticator_type(&self) -> &'static str;
}

/// API Key based authentication
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    /// Valid API keys map (key -> role)
    valid_keys: HashMap<String, Role>,
}

impl ApiKeyAuth {
    /// Create from a key -> role name map
    pub fn new(api_keys: &HashMap<String, String>) -> Self {
        let valid_keys = api_keys
            .iter()
            .map(|(key, role)| (key.clone(), Role::from_string(role)))
            .collect();

        Self { valid_keys }
    }

    /// Create a development API key authenticator with default key
    pub fn development() -> Self {
        let mut valid_keys = HashMap::new();
        valid_keys.insert("dev-api-key".to_string(), Role::Admin);
        Self { valid_keys }
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Claims> {
        let Some(api_key) = credentials.api_key.as_ref() else {
            return Ok(Claims::anonymous());
        };

        let role = self
            .valid_keys
            .get(api_key)
            .ok_or_else(|| AppError::Authentication("Invalid API key".to_string()))?;

        Ok(Claims {
            sub: api_key.clone(),
            role: role.clone(),
        })
    }

    fn authenticator_type(&self) -> &'static str {
        "ApiKey"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_from_header() {
        assert_eq!(
            Credentials::from_authorization_header(Some("Bearer abc")).api_key,
            Some("abc".to_string())
        );
        assert_eq!(
            Credentials::from_authorization_header(Some("ApiKey xyz")).api_key,
            Some("xyz".to_string())
        );
        assert_eq!(
            Credentials::from_authorization_header(Some("Basic dXNlcg==")).api_key,
            None
        );
        assert_eq!(Credentials::from_authorization_header(None).api_key, None);
    }

    #[tokio::test]
    async fn test_anonymous_without_key() {
        let auth = ApiKeyAuth::development();
        let claims = auth.authenticate(&Credentials::default()).await.unwrap();
        assert_eq!(claims, Claims::anonymous());
    }

    #[tokio::test]
    async fn test_known_key_maps_role() {
        let mut keys = HashMap::new();
        keys.insert("editor-key".to_string(), "editor".to_string());
        let auth = ApiKeyAuth::new(&keys);

        let claims = auth
            .authenticate(&Credentials::new(Some("editor-key".into())))
            .await
            .unwrap();
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(auth.authenticator_type(), "ApiKey");
    }

    #[tokio::test]
    async fn test_unknown_key_rejected() {
        let auth = ApiKeyAuth::development();
        let result = auth
            .authenticate(&Credentials::new(Some("wrong".into())))
            .await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }
}
