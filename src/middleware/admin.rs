use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use mongodb::bson::{doc, from_document};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;
use crate::store::collections;

const FORBIDDEN: &str = "forbidden access";

/// Admin guard: authentication plus a role lookup against the user
/// collection.
///
/// Runs the [`AuthUser`] check first, then requires a stored user whose email
/// matches the claims and whose role is `admin`; anything else rejects with
/// 403 "forbidden access".
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        let Some(email) = auth_user.email() else {
            return Err(ApiError::forbidden(FORBIDDEN));
        };

        let user = state
            .store
            .find_one(collections::USERS, doc! { "email": email })
            .await?;

        let is_admin = user
            .and_then(|document| from_document::<User>(document).ok())
            .map(|user| user.is_admin())
            .unwrap_or(false);

        if !is_admin {
            return Err(ApiError::forbidden(FORBIDDEN));
        }

        Ok(Self(auth_user))
    }
}
