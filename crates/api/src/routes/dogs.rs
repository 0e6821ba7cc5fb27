use axum::routing::get;
use axum::Router;

use crate::handlers::dogs;
use crate::state::AppState;

/// Dog routes.
///
/// ```text
/// GET    /dogs          -> list_dogs
/// POST   /dogs          -> create_dog
/// GET    /dogs/{id}     -> get_dog
/// PATCH  /dogs/{id}     -> update_dog
/// DELETE /dogs/{id}     -> delete_dog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dogs", get(dogs::list_dogs).post(dogs::create_dog))
        .route(
            "/dogs/{id}",
            get(dogs::get_dog)
                .patch(dogs::update_dog)
                .delete(dogs::delete_dog),
        )
}
