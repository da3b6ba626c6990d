use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// Authentication guard: caller identity extracted from a verified bearer
/// token.
///
/// Rejects with 401 "forbidden Access" when the `Authorization` header is
/// missing, not in `Bearer <token>` form, or carries an invalid or expired
/// token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
}

impl AuthUser {
    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthenticated)?;
        let claims = auth::verify(token, &config::config().security.token_secret)
            .map_err(|_| ApiError::Unauthenticated)?;
        Ok(Self { claims })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
