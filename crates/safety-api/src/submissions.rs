//! Public form submissions. Each one is a single insert with no validation
//! beyond the body being JSON.

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::{error, info};

use safety_db::Record;
use safety_types::api::{ContactRequest, MessageResponse, ReportRequest, SelfDefenceSubmission};
use safety_types::models::{ContactMessage, IncidentReport, SelfDefenceRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, run_blocking};

/// Insert `record`, collapsing any store failure into `failure_message`.
pub(crate) async fn submit<T: Record>(
    state: &AppState,
    record: T,
    failure_message: &'static str,
) -> Result<String, ApiError> {
    let result = run_blocking(state, move |db| Ok(db.insert(&record)?)).await;

    match result {
        Ok(id) => {
            info!(id = %id, collection = T::COLLECTION.table(), "Submission stored");
            Ok(id)
        }
        Err(e) => {
            error!(collection = T::COLLECTION.table(), "Submission failed: {}", e);
            Err(ApiError::SubmissionFailed(failure_message))
        }
    }
}

pub async fn contact(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = ContactMessage {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone.filter(|p| !p.trim().is_empty()),
        subject: req.subject,
        message: req.message,
        newsletter_opt_in: req.newsletter,
        created_at: Utc::now(),
    };

    submit(&state, message, "Failed to send message!").await?;
    Ok(Json(MessageResponse::new("Message sent successfully!")))
}

pub async fn report(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = IncidentReport {
        reporter_name: req.name,
        location: req.location,
        description: req.description,
        contact: req.contact,
        occurred_at: Utc::now(),
    };

    submit(&state, report, "Emergency alert failed!").await?;
    Ok(Json(MessageResponse::new("Emergency alert sent!")))
}

pub async fn self_defence(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SelfDefenceSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let request = SelfDefenceRequest {
        name: req.name,
        email: req.email,
        phone: req.phone,
        training_type: req.training,
        message: req.message,
        created_at: Utc::now(),
    };

    submit(&state, request, "Failed to submit training request!").await?;
    Ok(Json(MessageResponse::new("Training request submitted successfully!")))
}
