//! Autocomplete Routes
//!
//! 自动补全路由。调用方先经过认证，再检查基本交互接口权限。

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::autocomplete_handler::autocomplete;
use crate::security::middleware::{auth_middleware, require_basic_ajax};

/// 创建自动补全路由器
pub fn create_autocomplete_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/autocomplete", get(autocomplete))
        .route_layer(from_fn_with_state(state.clone(), require_basic_ajax))
        .route_layer(from_fn_with_state(state, auth_middleware))
}
