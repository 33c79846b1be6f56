use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::repositories::Store;

/// Liveness plus a round trip to the store.
pub async fn health_check(State(store): State<Store>) -> (StatusCode, Json<Value>) {
    let (status, store_status) = match store.catalog.is_empty().await {
        Ok(_) => (StatusCode::OK, "reachable"),
        Err(e) => {
            tracing::error!("Health check could not reach the store: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let body = json!({
        "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
        "service": "mefit",
        "store": store_status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (status, Json(body))
}
