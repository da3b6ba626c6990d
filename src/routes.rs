use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{carts, services, token, users};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/jwt", post(token::issue))
        .merge(service_routes())
        .merge(user_routes())
        .merge(cart_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/:id",
            get(services::get)
                .patch(services::update)
                .delete(services::remove),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", delete(users::remove))
        // GET reads the parameter as the caller's email, PATCH as a user id.
        .route(
            "/users/admin/:key",
            get(users::admin_status).patch(users::promote),
        )
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/carts", get(carts::list).post(carts::add))
        .route("/carts/:id", delete(carts::remove))
}

async fn root() -> &'static str {
    "Welcome To Motion-Master Server"
}
