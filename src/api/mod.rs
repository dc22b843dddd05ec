//! API 模块
//!
//! 提供测验页面、会话 Cookie 与图片代理。

pub mod app_state;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod views;

use crate::api::app_state::AppState;
use crate::observability::{ObservabilityState, create_observability_router, metrics_middleware};
use crate::security::middleware::security_headers_middleware;
use axum::{
    Router,
    http::{HeaderValue, header},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeFile, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Quiz pages, stylesheet and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let stylesheet = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=5"),
        ))
        .service(ServeFile::new(&app_state.config.catalog.stylesheet));
    let timeout = Duration::from_secs(app_state.config.server.request_timeout);

    Router::new()
        .merge(routes::quiz_routes::create_quiz_router())
        .route_service("/style.css", stylesheet)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn_with_state(
            app_state.metrics.clone(),
            metrics_middleware,
        ))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Full application: quiz router plus health, metrics and version endpoints.
pub fn build_app(app_state: AppState) -> Router {
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        app_state.catalog.len(),
        app_state.metrics.clone(),
    ));
    create_observability_router(observability_state).merge(create_router(app_state))
}
