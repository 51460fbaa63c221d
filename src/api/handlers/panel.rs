use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::api::models::{PanelResponse, RegisterPanelRequest};
use crate::api::AppState;
use crate::error::Result;

/// POST /api/v1/panels
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterPanelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PanelResponse>)> {
    let Json(request) = payload?;
    let panel = state.panels.register(request).await?;

    Ok((StatusCode::CREATED, Json(panel.into())))
}

/// GET /api/v1/panels/{panel}
pub async fn get_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<PanelResponse>> {
    let panel = state.panels.resolve(&serial).await?;
    Ok(Json(panel.into()))
}
