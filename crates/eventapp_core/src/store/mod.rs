//! Document-store collaborator: named collections of schemaless JSON documents.

mod firestore;
mod memory;

pub use firestore::{FirestoreStore, TokenSource};
pub use memory::{InMemoryStore, StoreOp};

use crate::error::StoreError;
use crate::subscription::Subscription;
use async_trait::async_trait;
use serde_json::Value;

pub const EVENTS: &str = "events";
pub const FAVORITES: &str = "favorites";
pub const USERS: &str = "users";

pub type Fields = serde_json::Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Equality filter on a top-level field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

pub fn matches_all(filters: &[Filter], fields: &Fields) -> bool {
    filters.iter().all(|f| f.matches(fields))
}

/// Receives the full result set of a watched query on every change.
pub type SnapshotListener = Box<dyn Fn(Result<Vec<Document>, StoreError>) + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert with a store-assigned ID.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Create or replace the document at `id`.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Merge `fields` into an existing document; fails with `NotFound` if it does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Live query. The listener gets the current result set right away and again after every
    /// change. An `Err` delivery ends the watch.
    fn watch(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        listener: SnapshotListener,
    ) -> Subscription;
}
