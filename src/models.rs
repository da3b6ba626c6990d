use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ADMIN_ROLE: &str = "admin";

/// Stored user document. Unknown fields are ignored on read; the guards only
/// care about the email/role pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Body of a create-user request: an email plus whatever profile fields the
/// client sends along.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewUser {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NewService {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}

/// Body of an update-service request. Every named field is written back on
/// update; fields the caller leaves out are overwritten with null.
#[derive(Debug, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ServiceUpdate {
    pub fn into_set_document(self) -> Document {
        doc! {
            "$set": {
                "name": self.name,
                "price": self.price,
                "description": self.description,
                "image": self.image,
            }
        }
    }
}

/// Body of an add-to-cart request: the owning email plus the service fields
/// copied from the catalog entry.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewCartItem {
    pub email: String,
    #[serde(flatten)]
    pub item: Map<String, Value>,
}
