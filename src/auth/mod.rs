use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Identity payload embedded in a bearer token.
///
/// Callers may put anything in the token body; only `email` is meaningful to
/// the guards, everything else rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Build claims from a caller-supplied JSON object, stamping issuance and
    /// expiry times. Caller-supplied `exp`/`iat` would collide with ours and
    /// are discarded.
    pub fn from_payload(mut payload: Map<String, Value>, ttl: Duration) -> Self {
        let email = payload
            .remove("email")
            .and_then(|v| v.as_str().map(str::to_owned));
        payload.remove("exp");
        payload.remove("iat");

        let now = Utc::now();
        Self {
            email,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            extra: payload,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token secret is not configured")]
    MissingSecret,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Sign the claims into a compact HS256 token.
pub fn issue(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), claims, &encoding_key)?)
}

/// Decode a token, checking signature and expiry.
pub fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(token_data.claims)
}
