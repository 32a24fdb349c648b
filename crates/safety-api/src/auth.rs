use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;

use safety_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use safety_types::models::{Account, AccountView};

use crate::credentials;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, run_blocking};

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn require_fields(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_fields(&[
        ("firstName", req.first_name.as_str()),
        ("lastName", req.last_name.as_str()),
        ("email", req.email.as_str()),
        ("password", req.password.as_str()),
        ("phone", req.phone.as_str()),
        ("emergencyContact", req.emergency_contact.as_str()),
        ("emergencyPhone", req.emergency_phone.as_str()),
    ])?;

    let email = normalize_email(&req.email);

    // Check-then-insert; concurrent signups for one email can still both land
    let user_id = run_blocking(&state, move |db| {
        if db.find_record::<Account>("email", &email)?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        let account = Account {
            first_name: req.first_name,
            last_name: req.last_name,
            email,
            password_digest: credentials::hash_password(&req.password)?,
            phone: req.phone,
            emergency_contact: req.emergency_contact,
            emergency_phone: req.emergency_phone,
            notifications_enabled: req.notifications,
            created_at: Utc::now(),
        };

        Ok(db.insert(&account)?)
    })
    .await?;

    info!(user_id = %user_id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Signup successful!".into(),
            user_id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_fields(&[("email", req.email.as_str()), ("password", req.password.as_str())])?;

    let email = normalize_email(&req.email);

    // Argon2 verification is CPU-bound, keep it on the blocking pool too
    let user = run_blocking(&state, move |db| {
        let account = db
            .find_record::<Account>("email", &email)?
            .ok_or(ApiError::UnknownAccount)?;

        if !credentials::verify_password(&req.password, &account.record.password_digest) {
            return Err(ApiError::InvalidCredential);
        }

        Ok(AccountView::from(account))
    })
    .await?;

    Ok(Json(LoginResponse {
        message: "Login successful!".into(),
        user,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let email = normalize_email(&email);

    let user = run_blocking(&state, move |db| {
        db.find_record::<Account>("email", &email)?
            .map(AccountView::from)
            .ok_or(ApiError::NotFound)
    })
    .await?;

    Ok(Json(user))
}
