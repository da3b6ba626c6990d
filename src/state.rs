use std::sync::Arc;

use crate::store::DocumentStore;

/// Shared application state: the single long-lived store handle, injected at
/// startup and cloned cheaply into each request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}
