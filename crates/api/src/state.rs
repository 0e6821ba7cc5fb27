use std::sync::Arc;

use kennel_db::DogStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Dog persistence. Postgres in production, in-memory in tests.
    pub store: Arc<dyn DogStore>,
}
