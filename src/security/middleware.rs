//! Security Middleware Module
//!
//! Provides Axum middleware for authentication, authorization and security headers.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::security::auth::{Claims, Credentials};
use crate::security::rbac::Permission;

/// Extension trait for adding claims to request extensions
pub trait RequestClaimsExt {
    fn claims(&self) -> Option<&Claims>;
    fn set_claims(&mut self, claims: Claims);
}

impl RequestClaimsExt for Request<Body> {
    fn claims(&self) -> Option<&Claims> {
        self.extensions().get::<Claims>()
    }

    fn set_claims(&mut self, claims: Claims) {
        self.extensions_mut().insert(claims);
    }
}

/// Authentication middleware
///
/// Requests without credentials continue as anonymous; an unknown key is rejected.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let credentials = extract_credentials(&req);
    let claims = state.authenticator.authenticate(&credentials).await?;
    debug!(sub = %claims.sub, role = %claims.role, "Caller authenticated");

    req.set_claims(claims);
    Ok(next.run(req).await)
}

/// Extract credentials from request headers
fn extract_credentials(req: &Request<Body>) -> Credentials {
    if let Some(api_key) = req.headers().get("X-API-Key") {
        if let Ok(key) = api_key.to_str() {
            return Credentials::new(Some(key.to_string()));
        }
    }

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    Credentials::from_authorization_header(auth_header)
}

/// Authorization middleware for the basic interactive endpoints
pub async fn require_basic_ajax(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = req
        .claims()
        .ok_or_else(|| AppError::Authentication("Request was not authenticated".to_string()))?;

    if state
        .authorizer
        .check_permission(claims, &Permission::UseBasicAjaxControllers)
        .await
    {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Authorization(format!(
            "role '{}' may not use basic interactive controllers",
            claims.role
        )))
    }
}

/// Security headers middleware
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    response
}
