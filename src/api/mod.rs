//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::security::middleware::security_headers_middleware;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState, security_headers: bool) -> Router {
    let api = Router::new().merge(routes::autocomplete_routes::create_autocomplete_router(
        app_state.clone(),
    ));

    let router = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http());

    let router = if security_headers {
        router.layer(axum::middleware::from_fn(security_headers_middleware))
    } else {
        router
    };

    router.with_state(app_state)
}
