use crate::observability::AppMetrics;
use crate::security::auth::Authenticator;
use crate::security::rbac::Authorizer;
use crate::services::autocomplete::AutocompleteService;
use std::sync::Arc;

/// Application state containing all shared services and security components
#[derive(Clone)]
pub struct AppState {
    /// Autocomplete service wrapping the injected search client
    pub autocomplete_service: Arc<dyn AutocompleteService>,
    /// Authenticator for API key validation
    pub authenticator: Arc<dyn Authenticator>,
    /// Authorizer for RBAC permission checks
    pub authorizer: Arc<dyn Authorizer>,
    /// Request counters shared with the observability endpoints
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("autocomplete_service", &"Arc<dyn AutocompleteService>")
            .field("authenticator", &self.authenticator.authenticator_type())
            .field("authorizer", &"Arc<dyn Authorizer>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        autocomplete_service: Box<dyn AutocompleteService>,
        authenticator: Box<dyn Authenticator>,
        authorizer: Box<dyn Authorizer>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            autocomplete_service: Arc::from(autocomplete_service),
            authenticator: Arc::from(authenticator),
            authorizer: Arc::from(authorizer),
            metrics,
        }
    }

    /// Create development application state with default security components
    pub fn development(autocomplete_service: Box<dyn AutocompleteService>) -> Self {
        use crate::security::auth::ApiKeyAuth;
        use crate::security::rbac::SimpleAuthorizer;

        Self::new(
            autocomplete_service,
            Box::new(ApiKeyAuth::development()),
            Box::new(SimpleAuthorizer::development()),
            Arc::new(AppMetrics::default()),
        )
    }
}
