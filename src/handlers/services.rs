use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::{doc, to_document, Document};

use super::parse_object_id;
use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::models::{NewService, ServiceUpdate};
use crate::state::AppState;
use crate::store::{collections, DeleteOutcome, InsertOutcome, UpdateOutcome};

/// GET /services - list the whole catalog.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let services = state.store.find(collections::SERVICES, doc! {}).await?;
    Ok(Json(services))
}

/// POST /services - add a catalog entry. Admin only.
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(service): Json<NewService>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let document =
        to_document(&service).map_err(|_| ApiError::bad_request("invalid service payload"))?;
    let outcome = state.store.insert_one(collections::SERVICES, document).await?;
    Ok(Json(outcome))
}

/// GET /services/:id - find by id, returned as a 0- or 1-element array.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let services = state.store.find(collections::SERVICES, filter).await?;
    Ok(Json(services))
}

/// PATCH /services/:id - overwrite the four catalog fields.
///
/// All four fields are written unconditionally; fields absent from the body
/// are stored as null.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ServiceUpdate>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let outcome = state
        .store
        .update_one(collections::SERVICES, filter, update.into_set_document())
        .await?;
    Ok(Json(outcome))
}

/// DELETE /services/:id - remove a catalog entry. Admin only.
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let outcome = state.store.delete_one(collections::SERVICES, filter).await?;
    Ok(Json(outcome))
}
