pub mod fscheck;

use axum::{
    http::StatusCode,
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::observability::encode_metrics;

pub use fscheck::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}

/// Build the application router: the report route (path taken from the
/// checker's config, answering every method), plus health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let route = state.checker.config().route.clone();

    Router::new()
        .route(&route, any(fscheck::fscheck))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
