//! Collection catalogue and the shapes the store hands back.

use safety_types::models::{
    Account, ContactMessage, IncidentReport, LocationPing, SelfDefenceRequest, SosContact,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Accounts,
    Contacts,
    Reports,
    Locations,
    SosContacts,
    SelfDefence,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Accounts,
        Collection::Contacts,
        Collection::Reports,
        Collection::Locations,
        Collection::SosContacts,
        Collection::SelfDefence,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Contacts => "contacts",
            Collection::Reports => "reports",
            Collection::Locations => "locations",
            Collection::SosContacts => "sos_contacts",
            Collection::SelfDefence => "self_defence_requests",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Order a `find_all` by one top-level document field.
#[derive(Debug, Clone, Copy)]
pub struct Sort<'a> {
    pub field: &'a str,
    pub order: SortOrder,
}

impl<'a> Sort<'a> {
    pub fn asc(field: &'a str) -> Self {
        Self { field, order: SortOrder::Ascending }
    }

    pub fn desc(field: &'a str) -> Self {
        Self { field, order: SortOrder::Descending }
    }
}

/// Raw stored document.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub body: serde_json::Value,
}

/// Binds a record type to the collection it lives in.
pub trait Record: Serialize + DeserializeOwned + Send + 'static {
    const COLLECTION: Collection;
}

impl Record for Account {
    const COLLECTION: Collection = Collection::Accounts;
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::Contacts;
}

impl Record for IncidentReport {
    const COLLECTION: Collection = Collection::Reports;
}

impl Record for LocationPing {
    const COLLECTION: Collection = Collection::Locations;
}

impl Record for SosContact {
    const COLLECTION: Collection = Collection::SosContacts;
}

impl Record for SelfDefenceRequest {
    const COLLECTION: Collection = Collection::SelfDefence;
}
