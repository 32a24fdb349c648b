use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use safety_db::Sort;
use safety_types::api::{LocationRequest, SuccessResponse};
use safety_types::models::{LocationPing, Stored};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, run_blocking};
use crate::submissions::submit;

/// Sort key for pings, newest first.
pub const RECORDED_AT: &str = "timestamp";

pub async fn record_location(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // userId is a weak reference; it is stored as sent
    let ping = LocationPing {
        account_id: req.user_id,
        latitude: req.latitude,
        longitude: req.longitude,
        recorded_at: req.timestamp.unwrap_or_else(Utc::now),
    };

    submit(&state, ping, "Failed to save location!").await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn list_locations(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let pings: Vec<Stored<LocationPing>> = run_blocking(&state, |db| {
        Ok(db.list_records::<LocationPing>(Some(Sort::desc(RECORDED_AT)))?)
    })
    .await?;

    Ok(Json(pings))
}
