use std::sync::Arc;

use safety_alert::AlertDispatcher;
use safety_db::Database;
use tracing::error;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub dispatcher: AlertDispatcher,
    /// Bearer token for the admin data API; `None` leaves it open.
    pub admin_token: Option<String>,
}

impl AppStateInner {
    pub fn new(db: Database, dispatcher: AlertDispatcher, admin_token: Option<String>) -> AppState {
        Arc::new(Self {
            db,
            dispatcher,
            admin_token,
        })
    }
}

/// Run store work off the async runtime.
pub async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })?
}
