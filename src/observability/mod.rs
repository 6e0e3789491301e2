//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::config::LoggingConfig;
use crate::search::SearchClient;

// ===== Simple Metrics (atomics, rendered in Prometheus text format) =====

/// 空结果类别，顺序与 [`AppMetrics::empty_by_kind`] 一致
const EMPTY_KINDS: [&str; 5] = [
    "invalid_query",
    "service_unavailable",
    "empty_response",
    "no_matches",
    "unexpected",
];

/// 简单应用指标
#[derive(Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub autocomplete_requests_total: AtomicU64,
    pub autocomplete_latency_sum: AtomicU64,
    pub autocomplete_results_total: AtomicU64,
    empty_by_kind: [AtomicU64; 5],
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// 记录一次自动补全请求
    pub fn record_autocomplete(&self, duration_ms: u64, results: usize) {
        self.autocomplete_requests_total
            .fetch_add(1, Ordering::Relaxed);
        self.autocomplete_latency_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
        self.autocomplete_results_total
            .fetch_add(results as u64, Ordering::Relaxed);
    }

    /// 记录折叠为空数组的请求
    pub fn record_empty_outcome(&self, kind: &str) {
        if let Some(index) = EMPTY_KINDS.iter().position(|k| *k == kind) {
            self.empty_by_kind[index].fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 某一类空结果的计数
    pub fn empty_outcomes(&self, kind: &str) -> u64 {
        EMPTY_KINDS
            .iter()
            .position(|k| *k == kind)
            .map(|index| self.empty_by_kind[index].load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let requests = self.autocomplete_requests_total.load(Ordering::Relaxed);
        let mut output = format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP autocomplete_requests_total Total autocomplete requests
# TYPE autocomplete_requests_total counter
autocomplete_requests_total {}
# HELP autocomplete_latency_seconds Autocomplete latency in seconds
# TYPE autocomplete_latency_seconds summary
autocomplete_latency_seconds_sum {}
autocomplete_latency_seconds_count {}
# HELP autocomplete_results_total Label/URI pairs returned
# TYPE autocomplete_results_total counter
autocomplete_results_total {}
# HELP autocomplete_empty_total Requests answered with an empty array
# TYPE autocomplete_empty_total counter
"#,
            self.http_requests_total.load(Ordering::Relaxed),
            self.http_request_duration_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::Relaxed),
            requests,
            self.autocomplete_latency_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            requests,
            self.autocomplete_results_total.load(Ordering::Relaxed),
        );

        for (kind, counter) in EMPTY_KINDS.iter().zip(&self.empty_by_kind) {
            output.push_str(&format!(
                "autocomplete_empty_total{{kind=\"{}\"}} {}\n",
                kind,
                counter.load(Ordering::Relaxed)
            ));
        }

        output
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性端点状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub search_client: Arc<dyn SearchClient>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(
        version: String,
        metrics: Arc<AppMetrics>,
        search_client: Arc<dyn SearchClient>,
    ) -> Self {
        Self {
            metrics,
            search_client,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 检查搜索服务
    pub async fn check_search_service(&self) -> HealthCheck {
        let start = Instant::now();
        let result = self.search_client.ping().await;
        let latency_ms = Some(start.elapsed().as_millis() as u64);

        match result {
            Ok(()) => HealthCheck {
                name: self.search_client.client_type().to_string(),
                status: "healthy".to_string(),
                message: None,
                latency_ms,
            },
            Err(e) => HealthCheck {
                name: self.search_client.client_type().to_string(),
                status: "unhealthy".to_string(),
                message: Some(e.to_string()),
                latency_ms,
            },
        }
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = vec![state.check_search_service().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查搜索服务）
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    match state.search_client.ping().await {
        Ok(()) => (StatusCode::OK, "Ready"),
        Err(e) => {
            tracing::warn!(error = %e, "Search service is not ready");
            (StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
        }
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先；配置了 `log_dir` 时按天滚动写入文件，返回的 guard
/// 必须在进程生命周期内保留，否则缓冲的日志会丢失。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,autocomplete={level}")));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{service_name}.log"));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }

    guard
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let start = Instant::now();
    let response = next.run(req).await;
    metrics.record_http_request(start.elapsed().as_millis() as u64);
    response
}
