use axum::{
    extract::{Path, Query, State},
    Json,
};
use mongodb::bson::{doc, to_document, Document};
use serde::Deserialize;

use super::parse_object_id;
use crate::error::ApiError;
use crate::models::NewCartItem;
use crate::state::AppState;
use crate::store::{collections, DeleteOutcome, InsertOutcome};

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

/// GET /carts?email= - list one owner's cart items.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    // No email means no owner to scope by; skip the store round trip.
    let Some(email) = query.email else {
        return Ok(Json(Vec::new()));
    };

    let items = state.store.find(collections::CARTS, doc! { "email": email }).await?;
    Ok(Json(items))
}

/// POST /carts - add an item to a cart.
pub async fn add(
    State(state): State<AppState>,
    Json(item): Json<NewCartItem>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let document =
        to_document(&item).map_err(|_| ApiError::bad_request("invalid cart payload"))?;
    let outcome = state.store.insert_one(collections::CARTS, document).await?;
    Ok(Json(outcome))
}

/// DELETE /carts/:id - remove an item from a cart.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let outcome = state.store.delete_one(collections::CARTS, filter).await?;
    Ok(Json(outcome))
}
