use std::collections::HashMap;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

pub(crate) const BOOK_ADDED: &str = "book_added";
pub(crate) const BOOK_UPDATED: &str = "book_updated";
pub(crate) const BOOK_REMOVED: &str = "book_removed";
pub(crate) const MEMBER_ADDED: &str = "member_added";
pub(crate) const MEMBER_UPDATED: &str = "member_updated";
pub(crate) const MEMBER_REMOVED: &str = "member_removed";
pub(crate) const MEMBER_SUSPENDED: &str = "member_suspended";
pub(crate) const MEMBER_REINSTATED: &str = "member_reinstated";
pub(crate) const BOOK_BORROWED: &str = "book_borrowed";
pub(crate) const BOOK_RETURNED: &str = "book_returned";
pub(crate) const FINE_CREATED: &str = "fine_created";
pub(crate) const FINE_PAID: &str = "fine_paid";

// DomainEventType defines type of event for domain changes
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum DomainEventType {
    Added,
    Updated,
    Deleted,
}

// DomainEvent abstracts domain event for data changes
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct DomainEvent {
    pub event_id: String,
    pub name: String,
    pub group: String,
    pub key: String,
    pub kind: DomainEventType,
    pub metadata: HashMap<String, String>,
    pub json_data: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl DomainEvent {
    pub fn added<T: Serialize>(name: &str, group: &str, key: i64, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Added, data)
    }

    pub fn updated<T: Serialize>(name: &str, group: &str, key: i64, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Updated, data)
    }

    pub fn deleted<T: Serialize>(name: &str, group: &str, key: i64, data: &T) -> serde_json::Result<Self> {
        Self::build(name, group, key, DomainEventType::Deleted, data)
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    fn build<T: Serialize>(name: &str, group: &str, key: i64, kind: DomainEventType, data: &T) -> serde_json::Result<DomainEvent> {
        Ok(DomainEvent {
            event_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            kind,
            metadata: HashMap::new(),
            json_data: serde_json::to_string(data)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}
