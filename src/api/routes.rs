use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::exercises::exercise_routes;
use super::health::health_check;
use super::profiles::profile_routes;
use crate::config::AppConfig;
use crate::repositories::Store;

pub fn create_routes(store: Store, config: &AppConfig) -> Router {
    let api_v1 = Router::new()
        .nest("/exercises", exercise_routes(store.clone()))
        .nest("/profiles", profile_routes(store.clone(), config.max_picture_bytes));

    // Any origin, any header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .with_state(store)
        .nest("/api/v1", api_v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
