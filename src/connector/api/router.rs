use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::container::Container;
use super::controller::predict;

/// Build the HTTP router. `POST /predict` is the service's single operation;
/// `GET /health` answers liveness probes.
pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(container)
}

async fn health() -> &'static str {
    "ok"
}
