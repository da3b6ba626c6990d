#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::{json, Value};
use tower::ServiceExt;

use motion_master_api::routes;
use motion_master_api::state::AppState;
use motion_master_api::store::{
    collections, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory stand-in for the MongoDB deployment, with the same unique-email
/// behavior on the user collection. `find_calls` counts queries so tests can
/// assert a route never touched the store.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    pub find_calls: AtomicUsize,
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let guard = self.collections.lock().unwrap();
        Ok(guard
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.lock().unwrap();
        Ok(guard.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches(document, &filter))
                .cloned()
        }))
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let mut guard = self.collections.lock().unwrap();
        let documents = guard.entry(collection.to_string()).or_default();

        if collection == collections::USERS {
            if let Some(email) = document.get("email") {
                if documents.iter().any(|existing| existing.get("email") == Some(email)) {
                    return Err(StoreError::DuplicateKey {
                        collection: collection.to_string(),
                    });
                }
            }
        }

        let id = ObjectId::new();
        document.insert("_id", id);
        documents.push(document);

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: Some(id),
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut guard = self.collections.lock().unwrap();
        let documents = guard.entry(collection.to_string()).or_default();

        let Some(document) = documents
            .iter_mut()
            .find(|document| matches(document, &filter))
        else {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
            });
        };

        let before = document.clone();
        if let Ok(set) = update.get_document("$set") {
            for (key, value) in set {
                document.insert(key.clone(), value.clone());
            }
        }

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(*document != before),
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError> {
        let mut guard = self.collections.lock().unwrap();
        let documents = guard.entry(collection.to_string()).or_default();

        let deleted = match documents
            .iter()
            .position(|document| matches(document, &filter))
        {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: deleted,
        })
    }
}

/// Build the full router over a fresh in-memory store.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        // Must happen before the config singleton is first read.
        std::env::set_var("ACCESS_TOKEN_SECRET", TEST_SECRET);
        let _ = motion_master_api::config::config();
    });

    let store = Arc::new(MemoryStore::default());
    let app = routes::app(AppState::new(store.clone()));
    (app, store)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn send_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Acquire a bearer token through the issue-token route itself.
pub async fn issue_token(app: &Router, payload: Value) -> String {
    let (status, body) = send(app, Method::POST, "/jwt", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token in response").to_string()
}

/// Seed an admin user directly into the store and return a token for it.
pub async fn seed_admin(app: &Router, store: &MemoryStore, email: &str) -> String {
    store
        .insert_one(collections::USERS, doc! { "email": email, "role": "admin" })
        .await
        .unwrap();
    issue_token(app, json!({ "email": email })).await
}

/// Pull the hex id out of an extended-JSON `{"$oid": ...}` value.
pub fn oid(value: &Value) -> String {
    value["$oid"].as_str().expect("$oid value").to_string()
}
