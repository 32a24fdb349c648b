use axum::{Json, extract::State, response::IntoResponse};
use tracing::debug;

use safety_db::Sort;
use safety_types::api::DashboardData;
use safety_types::models::{
    Account, AccountView, ContactMessage, IncidentReport, LocationPing, SelfDefenceRequest,
    SosContact,
};

use crate::error::ApiError;
use crate::location::RECORDED_AT;
use crate::state::{AppState, run_blocking};

/// Everything the admin dashboard shows, read in one go. Any failed read
/// fails the whole response rather than returning partial tables.
pub async fn dashboard_data(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let data = run_blocking(&state, |db| {
        let read = || -> anyhow::Result<DashboardData> {
            Ok(DashboardData {
                users: db
                    .list_records::<Account>(None)?
                    .into_iter()
                    .map(AccountView::from)
                    .collect(),
                contacts: db.list_records::<ContactMessage>(None)?,
                reports: db.list_records::<IncidentReport>(None)?,
                locations: db.list_records::<LocationPing>(Some(Sort::desc(RECORDED_AT)))?,
                sos: db.list_records::<SosContact>(None)?,
                self_defence: db.list_records::<SelfDefenceRequest>(Some(Sort::desc("createdAt")))?,
            })
        };

        read().map_err(ApiError::Aggregation)
    })
    .await?;

    debug!(
        users = data.users.len(),
        locations = data.locations.len(),
        "Dashboard data assembled"
    );

    Ok(Json(data))
}
