//! Key-addressed document store abstraction.
//!
//! Handlers never talk to a database client directly; they receive a
//! `DocumentStore` handle per invocation. The production implementation
//! keeps documents as JSONB rows in Postgres; the in-memory implementation
//! backs local development and the integration tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Collection holding user profile documents, keyed by uid.
pub const USERS: &str = "users";
/// Collection holding flashcard set documents, keyed by generated id.
pub const FLASHCARDS: &str = "flashcards";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document {id} in {collection}")]
    NotFound { collection: String, id: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

/// A named-collection document store: string id -> JSON object.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under a store-generated id and return the id.
    async fn add(&self, collection: &str, doc: &Value) -> Result<String, StoreError>;

    /// Fetch a document, `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Write a document at a known id, overwriting any existing one.
    async fn set(&self, collection: &str, id: &str, doc: &Value) -> Result<(), StoreError>;

    /// Shallow-merge `fields` into an existing document. Fails with
    /// `NotFound` when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: &Value) -> Result<(), StoreError>;

    /// Atomically append `value` to the array field `field` of an existing
    /// document, creating the array if the field is absent. Fails with
    /// `NotFound` when the document does not exist.
    async fn array_union(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: &Value,
    ) -> Result<(), StoreError>;
}
