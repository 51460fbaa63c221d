use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::api::models::{
    AggregateListResponse, PostReadingRequest, ReadingCreatedResponse, ReadingListResponse,
};
use crate::api::AppState;
use crate::error::Result;

/// GET /api/v1/panels/{panel}/analytics
/// `panel` is the panel serial.
pub async fn list_readings(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<ReadingListResponse>> {
    let response = state.analytics.readings_for_panel(&serial).await?;
    Ok(Json(response))
}

/// POST /api/v1/panels/{panel}/analytics
/// `panel` is the numeric panel id; anything else is a bad request.
pub async fn post_reading(
    State(state): State<AppState>,
    Path(panel_id): Path<String>,
    payload: std::result::Result<Json<PostReadingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReadingCreatedResponse>)> {
    let Json(request) = payload?;
    let reading = state.analytics.record_reading(&panel_id, request).await?;

    Ok((StatusCode::CREATED, Json(reading.into())))
}

/// GET /api/v1/panels/{panel}/analytics/day
pub async fn day_results(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<AggregateListResponse>> {
    let response = state.analytics.daily_breakdown(&serial).await?;
    Ok(Json(response))
}

/// GET /api/v1/analytics/historical
pub async fn historical(State(state): State<AppState>) -> Result<Json<AggregateListResponse>> {
    let response = state.analytics.historical_aggregates().await?;
    Ok(Json(response))
}
