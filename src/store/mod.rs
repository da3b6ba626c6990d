use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use serde::Serialize;
use thiserror::Error;

pub mod mongo;

pub use mongo::MongoStore;

/// Collection names as they exist in the deployment.
pub mod collections {
    pub const SERVICES: &str = "AllServices";
    pub const USERS: &str = "Users";
    pub const CARTS: &str = "carts";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key in {collection}")]
    DuplicateKey { collection: String },
    #[error("store backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Option<ObjectId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Collection-scoped CRUD primitives over the document database.
///
/// A single long-lived implementation is injected into the router state at
/// startup and shared across request handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError>;
}
