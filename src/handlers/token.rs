use axum::Json;
use chrono::Duration;
use serde_json::{json, Map, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// POST /jwt - issue a bearer token embedding the supplied identity payload.
///
/// The payload is accepted as-is; a one hour expiry (configurable) is stamped
/// on.
pub async fn issue(Json(payload): Json<Map<String, Value>>) -> Result<Json<Value>, ApiError> {
    let security = &config::config().security;
    let claims = Claims::from_payload(payload, Duration::hours(security.token_ttl_hours));

    let token = auth::issue(&claims, &security.token_secret).map_err(|err| {
        tracing::error!("token issuance failed: {err}");
        ApiError::internal("could not issue token")
    })?;

    Ok(Json(json!({ "token": token })))
}
