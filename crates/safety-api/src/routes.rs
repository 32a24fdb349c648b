use axum::{
    Json, Router, middleware,
    routing::{get, post},
};

use safety_types::api::HealthResponse;

use crate::middleware::require_admin;
use crate::state::AppState;
use crate::{admin, auth, location, sos, submissions};

/// JSON API routes. Static pages and transport layers are added by the
/// server binary.
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/api/data", get(admin::dashboard_data))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/signup", post(auth::register))
        .route("/api/signup", post(auth::register))
        .route("/login", post(auth::login))
        .route("/api/login", post(auth::login))
        .route("/profile/{email}", get(auth::profile))
        .route("/contact", post(submissions::contact))
        .route("/report", post(submissions::report))
        .route("/self-defence", post(submissions::self_defence))
        .route("/api/location", post(location::record_location))
        .route("/api/locations", get(location::list_locations))
        .route("/save-sos", post(sos::save_contact))
        .route("/send-sos", post(sos::send_alert))
        .route("/health", get(health))
        .merge(admin_routes)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
