use std::time::Duration;

use crate::api::handlers::{analytics, health, panel};
use crate::api::AppState;
use axum::{
    extract::Request,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{classify::ServerErrorsFailureClass, cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, Span};

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/panels", post(panel::register))
        .route("/api/v1/panels/{panel}", get(panel::get_by_serial))
        .route(
            "/api/v1/panels/{panel}/analytics",
            get(analytics::list_readings).post(analytics::post_reading),
        )
        .route(
            "/api/v1/panels/{panel}/analytics/day",
            get(analytics::day_results),
        )
        .route("/api/v1/analytics/historical", get(analytics::historical));

    Router::new()
        .route("/health", get(health::health))
        .merge(api_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(request_started)
                .on_response(request_finished)
                .on_failure(request_failed),
        )
}

/// One `http_request` span per call; the status lands on the completion event.
fn request_span(request: &Request) -> Span {
    tracing::span!(
        Level::INFO,
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

fn request_started(_request: &Request, _span: &Span) {
    tracing::debug!("request received");
}

fn request_finished(response: &Response, latency: Duration, _span: &Span) {
    tracing::info!(
        status = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "request completed"
    );
}

fn request_failed(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(%failure, latency_ms = latency.as_millis() as u64, "request failed");
}
