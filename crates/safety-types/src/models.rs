use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record as held by the store, paired with its generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

/// Registered user. The digest is kept here and only here; everything that
/// goes back over the wire uses [`AccountView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub first_name: String,
    pub last_name: String,
    /// Always stored trimmed and lowercased.
    pub email: String,
    pub password_digest: String,
    pub phone: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    #[serde(rename = "notifications")]
    pub notifications_enabled: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Account as exposed to clients and the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub notifications: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<Stored<Account>> for AccountView {
    fn from(stored: Stored<Account>) -> Self {
        let Stored { id, record } = stored;
        Self {
            id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            emergency_contact: record.emergency_contact,
            emergency_phone: record.emergency_phone,
            notifications: record.notifications_enabled,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(rename = "newsletter")]
    pub newsletter_opt_in: bool,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    #[serde(rename = "name")]
    pub reporter_name: String,
    pub location: String,
    pub description: String,
    pub contact: String,
    #[serde(rename = "date", with = "crate::timestamp")]
    pub occurred_at: DateTime<Utc>,
}

/// `account_id` is a weak reference: it is never checked against accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPing {
    #[serde(rename = "userId")]
    pub account_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "timestamp", with = "crate::timestamp")]
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosContact {
    #[serde(rename = "number")]
    pub phone_number: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfDefenceRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "training")]
    pub training_type: String,
    pub message: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}
