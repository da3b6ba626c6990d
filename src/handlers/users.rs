use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::{doc, from_document, to_document, Document};
use serde_json::{json, Value};

use super::parse_object_id;
use crate::error::ApiError;
use crate::middleware::{AdminUser, AuthUser};
use crate::models::{NewUser, User, ADMIN_ROLE};
use crate::state::AppState;
use crate::store::{collections, DeleteOutcome, StoreError, UpdateOutcome};

/// GET /users - list all users.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let users = state.store.find(collections::USERS, doc! {}).await?;
    Ok(Json(users))
}

/// POST /users - create a user, once per unique email.
///
/// Uniqueness rides on the store-level index rather than a find-then-insert,
/// so concurrent identical requests cannot both slip through; the losing
/// insert reports the same "already exists" result as a sequential retry.
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<Value>, ApiError> {
    let document =
        to_document(&user).map_err(|_| ApiError::bad_request("invalid user payload"))?;

    match state.store.insert_one(collections::USERS, document).await {
        Ok(outcome) => Ok(Json(json!(outcome))),
        Err(StoreError::DuplicateKey { .. }) => Ok(Json(json!({
            "message": "User Already Exist",
            "insertedId": null,
        }))),
        Err(err) => Err(err.into()),
    }
}

/// DELETE /users/:id - remove a user. Admin only.
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let outcome = state.store.delete_one(collections::USERS, filter).await?;
    Ok(Json(outcome))
}

/// GET /users/admin/:email - report whether the caller is an admin.
///
/// Identity-matching guard: callers may only ask about their own email. This
/// does not require the admin role itself.
pub async fn admin_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if auth_user.email() != Some(email.as_str()) {
        return Err(ApiError::forbidden("unauthorized access"));
    }

    let user = state
        .store
        .find_one(collections::USERS, doc! { "email": &email })
        .await?;

    let admin = user
        .and_then(|document| from_document::<User>(document).ok())
        .map(|user| user.is_admin())
        .unwrap_or(false);

    Ok(Json(json!({ "admin": admin })))
}

/// PATCH /users/admin/:id - promote a user to admin. Admin only.
pub async fn promote(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let filter = doc! { "_id": parse_object_id(&id)? };
    let update = doc! { "$set": { "role": ADMIN_ROLE } };
    let outcome = state.store.update_one(collections::USERS, filter, update).await?;
    Ok(Json(outcome))
}
