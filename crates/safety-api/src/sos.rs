//! SOS contacts and alert dispatch. Saving a number and alerting it are
//! independent; an alert can go to a number that was never saved.

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use safety_alert::SOS_MESSAGE;
use safety_types::api::{SosRequest, SuccessResponse};
use safety_types::models::SosContact;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;
use crate::submissions::submit;

fn require_number(req: &SosRequest) -> Result<String, ApiError> {
    let number = req.number.trim();
    if number.is_empty() {
        return Err(ApiError::Validation("Phone number is required".into()));
    }
    Ok(number.to_string())
}

pub async fn save_contact(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SosRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = SosContact {
        phone_number: require_number(&req)?,
        created_at: Utc::now(),
    };

    submit(&state, contact, "Failed to save SOS contact!").await?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn send_alert(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SosRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let number = require_number(&req)?;

    state.dispatcher.send_sos(&number, SOS_MESSAGE).await?;
    Ok(Json(SuccessResponse { success: true }))
}
