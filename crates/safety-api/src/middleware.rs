use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Gate the admin data API behind `Authorization: Bearer <token>` when an
/// admin token is configured. Without one the route stays open.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    // Compare fixed-size digests so timing does not depend on the token prefix
    if Sha256::digest(presented.as_bytes()) != Sha256::digest(expected.as_bytes()) {
        warn!("Rejected admin request with wrong token");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
