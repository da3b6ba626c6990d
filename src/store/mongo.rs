use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Database, IndexModel,
};

use super::{
    collections, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Production [`DocumentStore`] backed by a MongoDB deployment.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;
        let db = client.database(database);

        // Fail fast when the deployment is unreachable.
        db.run_command(doc! { "ping": 1 }, None).await?;

        let store = Self { db };
        store.ensure_indexes().await?;
        Ok(store)
    }

    // The unique email index backs the idempotent user insert: a concurrent
    // duplicate surfaces as DuplicateKey instead of racing a find-then-insert.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<Document>(collections::USERS)
            .create_index(index, None)
            .await?;
        Ok(())
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.db.collection(name)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter, None).await?)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        match self.collection(collection).insert_one(document, None).await {
            Ok(result) => Ok(InsertOutcome {
                acknowledged: true,
                inserted_id: result.inserted_id.as_object_id(),
            }),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, update, None)
            .await?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError> {
        let result = self.collection(collection).delete_one(filter, None).await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
