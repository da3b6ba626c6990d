use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

pub mod carts;
pub mod services;
pub mod token;
pub mod users;

/// Path ids are hex-encoded ObjectIds; anything else is rejected before the
/// store is consulted.
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::bad_request("malformed document id"))
}
