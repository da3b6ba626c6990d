pub mod admin;
pub mod auth;

pub use admin::AdminUser;
pub use auth::AuthUser;
