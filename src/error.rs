//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。
//!
//! 自动补全请求内部使用带标签的 [`AutocompleteError`]，只在 HTTP 边界处
//! 统一折叠为空数组响应；[`AppError`] 用于启动、认证与授权等框架层错误。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 认证错误
    #[error("认证失败: {0}")]
    Authentication(String),

    /// 授权错误
    #[error("未授权访问: {0}")]
    Authorization(String),

    /// 搜索服务错误
    #[error("搜索服务错误: {0}")]
    Search(#[from] SearchError),
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::Authentication(_) => (401, "UNAUTHORIZED".to_string()),
            AppError::Authorization(_) => (403, "FORBIDDEN".to_string()),
            AppError::Search(_) => (503, "SERVICE_UNAVAILABLE".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 搜索服务调用错误
#[derive(Error, Debug)]
pub enum SearchError {
    /// 网络或超时错误
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// 搜索服务返回非 2xx 状态
    #[error("search service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应体不是合法 JSON
    #[error("malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 查询构建被拒绝的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidQuery {
    #[error("request has no 'term' parameter")]
    MissingTerm,

    #[error("term is {len} UTF-16 units long, the maximum is {max}")]
    TermTooLong { len: usize, max: usize },

    #[error("query string could not be parsed: {0}")]
    MalformedParameters(String),
}

/// 自动补全请求的终止错误
///
/// 所有变体在 HTTP 边界都折叠为 `[]`，这里保留结构化信息以便记录日志和测试。
#[derive(Error, Debug)]
pub enum AutocompleteError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQuery),

    #[error("search service unavailable: {0}")]
    ServiceUnavailable(#[from] SearchError),

    #[error("search service returned {0}")]
    EmptyResponse(EmptyResponse),

    #[error("no matches")]
    NoMatches,

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl AutocompleteError {
    /// 指标与日志中使用的类别名
    pub fn kind(&self) -> &'static str {
        match self {
            AutocompleteError::InvalidQuery(_) => "invalid_query",
            AutocompleteError::ServiceUnavailable(_) => "service_unavailable",
            AutocompleteError::EmptyResponse(_) => "empty_response",
            AutocompleteError::NoMatches => "no_matches",
            AutocompleteError::Unexpected(_) => "unexpected",
        }
    }
}

/// 搜索服务成功返回但没有可用内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyResponse {
    /// 响应体为空或为 `null`
    NullResponse,
    /// 响应中缺少结果列表
    NullResultList,
}

impl std::fmt::Display for EmptyResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyResponse::NullResponse => write!(f, "a null response"),
            EmptyResponse::NullResultList => write!(f, "a response without a result list"),
        }
    }
}

/// 单条命中记录无法映射的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HitError {
    #[error("hit is not a field document")]
    NotADocument,

    #[error("field '{0}' is missing")]
    MissingField(String),

    #[error("field '{field}' is not {expected}")]
    WrongShape { field: String, expected: &'static str },

    #[error("field '{0}' is empty")]
    EmptyValue(String),
}
